//! In-process adapter implementing every persistence port against a single
//! mutex-guarded store.
//!
//! Used when no database URL is configured (local development without
//! PostgreSQL) and by the integration tests. Semantics mirror the Diesel
//! adapters, including the unique-owner rule on team commits, so the same
//! service code runs unchanged on either backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    CatalogPersistenceError, CatalogRepository, DraftCommitError, DraftRepository, DraftStatus,
    NewUser, SeedOutcome, SeedPersistenceError, SeedRepository, SeedSchool, StoredCredentials,
    TeamCommit, TokenPersistenceError, UserPersistenceError, UserRepository, VerificationToken,
    VerificationTokenRepository,
};
use crate::domain::roster::{CatalogPlayer, DraftPick, Role};
use crate::domain::user::{DEFAULT_BUDGET, EmailAddress, ProfileChanges, UserId, UserProfile};

#[derive(Debug, Clone)]
struct UserRecord {
    id: Uuid,
    email: String,
    password_hash: Option<String>,
    display_name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email_verified_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    providers: Vec<String>,
    budget: i32,
    has_team: bool,
}

#[derive(Debug, Clone)]
struct PlayerRecord {
    id: Uuid,
    school_name: String,
    name: String,
    role: Role,
    value: i32,
}

#[derive(Debug, Clone)]
struct TeamRecord {
    #[expect(dead_code, reason = "kept for parity with the relational shape")]
    id: Uuid,
    #[expect(dead_code, reason = "kept for parity with the relational shape")]
    name: String,
    player_ids: Vec<Uuid>,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, UserRecord>,
    schools: Vec<String>,
    players: Vec<PlayerRecord>,
    teams: HashMap<Uuid, TeamRecord>,
    tokens: Vec<VerificationToken>,
}

/// Shared in-memory store implementing all persistence ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means a panicking test thread; the data is
        // still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn profile_of(record: &UserRecord) -> Result<UserProfile, UserPersistenceError> {
        let email = EmailAddress::new(&record.email)
            .map_err(|err| UserPersistenceError::query(format!("stored email invalid: {err}")))?;
        Ok(UserProfile {
            id: UserId::from_uuid(record.id),
            email,
            display_name: record.display_name.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email_verified_at: record.email_verified_at,
            created_at: record.created_at,
            has_password: record.password_hash.is_some(),
            has_google_account: record.providers.iter().any(|p| p == "google"),
            budget: record.budget,
            has_team: record.has_team,
        })
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<(), UserPersistenceError> {
        let mut state = self.lock();
        if state
            .users
            .values()
            .any(|record| record.email == user.email.as_ref())
        {
            return Err(UserPersistenceError::DuplicateEmail);
        }
        state.users.insert(
            *user.id.as_uuid(),
            UserRecord {
                id: *user.id.as_uuid(),
                email: user.email.as_ref().to_owned(),
                password_hash: Some(user.password_hash.clone()),
                display_name: user.display_name.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                email_verified_at: None,
                created_at: Utc::now(),
                providers: Vec::new(),
                budget: DEFAULT_BUDGET,
                has_team: false,
            },
        );
        Ok(())
    }

    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let state = self.lock();
        Ok(state
            .users
            .values()
            .find(|record| record.email == email.as_ref())
            .map(|record| StoredCredentials {
                user_id: UserId::from_uuid(record.id),
                password_hash: record.password_hash.clone(),
            }))
    }

    async fn find_profile(
        &self,
        id: &UserId,
    ) -> Result<Option<UserProfile>, UserPersistenceError> {
        let state = self.lock();
        state.users.get(id.as_uuid()).map(Self::profile_of).transpose()
    }

    async fn draft_status(
        &self,
        id: &UserId,
    ) -> Result<Option<DraftStatus>, UserPersistenceError> {
        let state = self.lock();
        Ok(state.users.get(id.as_uuid()).map(|record| DraftStatus {
            budget: record.budget,
            has_team: record.has_team,
        }))
    }

    async fn apply_profile_changes(
        &self,
        id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<UserProfile>, UserPersistenceError> {
        let mut state = self.lock();
        let Some(record) = state.users.get_mut(id.as_uuid()) else {
            return Ok(None);
        };
        if let Some(display_name) = &changes.display_name {
            record.display_name = display_name.clone();
        }
        if let Some(first_name) = &changes.first_name {
            record.first_name = first_name.clone();
        }
        if let Some(last_name) = &changes.last_name {
            record.last_name = last_name.clone();
        }
        Self::profile_of(record).map(Some)
    }

    async fn set_password_hash(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserPersistenceError> {
        let mut state = self.lock();
        let record = state
            .users
            .get_mut(id.as_uuid())
            .ok_or_else(|| UserPersistenceError::query("user not found"))?;
        record.password_hash = Some(password_hash.to_owned());
        Ok(())
    }

    async fn email_owner(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserId>, UserPersistenceError> {
        let state = self.lock();
        Ok(state
            .users
            .values()
            .find(|record| record.email == email.as_ref())
            .map(|record| UserId::from_uuid(record.id)))
    }

    async fn apply_email_change(
        &self,
        id: &UserId,
        email: &EmailAddress,
    ) -> Result<(), UserPersistenceError> {
        let mut state = self.lock();
        if state
            .users
            .values()
            .any(|record| record.email == email.as_ref() && record.id != *id.as_uuid())
        {
            return Err(UserPersistenceError::DuplicateEmail);
        }
        let record = state
            .users
            .get_mut(id.as_uuid())
            .ok_or_else(|| UserPersistenceError::query("user not found"))?;
        record.email = email.as_ref().to_owned();
        record.email_verified_at = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn list_players(&self) -> Result<Vec<CatalogPlayer>, CatalogPersistenceError> {
        let state = self.lock();
        Ok(state
            .players
            .iter()
            .map(|player| CatalogPlayer {
                id: player.id,
                name: player.name.clone(),
                role: player.role,
                school_name: player.school_name.clone(),
                value: player.value,
            })
            .collect())
    }

    async fn find_picks(&self, ids: &[Uuid]) -> Result<Vec<DraftPick>, CatalogPersistenceError> {
        let state = self.lock();
        Ok(state
            .players
            .iter()
            .filter(|player| ids.contains(&player.id))
            .map(|player| DraftPick {
                id: player.id,
                role: player.role,
                value: player.value,
            })
            .collect())
    }
}

#[async_trait]
impl DraftRepository for MemoryStore {
    async fn commit_team(&self, commit: &TeamCommit) -> Result<(), DraftCommitError> {
        let mut state = self.lock();
        let owner = *commit.user_id.as_uuid();
        // Mirrors the unique index on the owner column.
        if state.teams.contains_key(&owner) {
            return Err(DraftCommitError::AlreadyHasTeam);
        }
        let record = state
            .users
            .get_mut(&owner)
            .ok_or_else(|| DraftCommitError::query("user not found"))?;
        record.has_team = true;
        record.budget -= commit.total_cost;
        state.teams.insert(
            owner,
            TeamRecord {
                id: commit.team_id,
                name: commit.name.as_ref().to_owned(),
                player_ids: commit.player_ids.clone(),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl VerificationTokenRepository for MemoryStore {
    async fn put(&self, record: &VerificationToken) -> Result<(), TokenPersistenceError> {
        self.lock().tokens.push(record.clone());
        Ok(())
    }

    async fn find_by_prefix(
        &self,
        identifier_prefix: &str,
        token: &str,
    ) -> Result<Option<VerificationToken>, TokenPersistenceError> {
        let state = self.lock();
        Ok(state
            .tokens
            .iter()
            .find(|record| {
                record.token == token && record.identifier.starts_with(identifier_prefix)
            })
            .cloned())
    }

    async fn delete_by_prefix(
        &self,
        identifier_prefix: &str,
    ) -> Result<(), TokenPersistenceError> {
        self.lock()
            .tokens
            .retain(|record| !record.identifier.starts_with(identifier_prefix));
        Ok(())
    }
}

#[async_trait]
impl SeedRepository for MemoryStore {
    async fn apply(&self, catalog: &[SeedSchool]) -> Result<SeedOutcome, SeedPersistenceError> {
        let mut state = self.lock();
        let mut outcome = SeedOutcome::default();

        for school in catalog {
            if !state.schools.contains(&school.name) {
                state.schools.push(school.name.clone());
                outcome.schools_created += 1;
            }
            for player in &school.players {
                let exists = state
                    .players
                    .iter()
                    .any(|p| p.school_name == school.name && p.name == player.name);
                if !exists {
                    state.players.push(PlayerRecord {
                        id: Uuid::new_v4(),
                        school_name: school.name.clone(),
                        name: player.name.clone(),
                        role: player.role,
                        value: player.value,
                    });
                    outcome.players_created += 1;
                }
            }
        }

        Ok(outcome)
    }
}
