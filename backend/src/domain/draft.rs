//! Team draft validation and commit.
//!
//! This is the one multi-step mutation in the system. Every rule is
//! re-derived here from authoritative data (current budget, current catalog,
//! current team flag); the client-side wizard enforces the same rules purely
//! for responsiveness and is not a trust boundary.
//!
//! Checks run in a fixed order and short-circuit on the first failure: name
//! shape, single-team rule, roster size, duplicate ids, player existence,
//! role composition, budget. Only then does the commit transaction run.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;
use tracing::error;
use uuid::Uuid;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ports::{
    CatalogPersistenceError, CatalogRepository, DraftCommand, DraftCommitError, DraftRepository,
    TeamCommit, UserPersistenceError, UserRepository,
};
use crate::domain::roster::{DraftPick, ROLES, ROSTER_SIZE, Role};
use crate::domain::team::TeamName;
use crate::domain::user::UserId;

/// Draft workflow service: validates a candidate roster and commits it.
#[derive(Clone)]
pub struct DraftService<U, C, D> {
    users: Arc<U>,
    catalog: Arc<C>,
    drafts: Arc<D>,
}

impl<U, C, D> DraftService<U, C, D> {
    /// Create a new service over the given ports.
    pub const fn new(users: Arc<U>, catalog: Arc<C>, drafts: Arc<D>) -> Self {
        Self {
            users,
            catalog,
            drafts,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

fn map_catalog_error(error: CatalogPersistenceError) -> Error {
    match error {
        CatalogPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("catalog unavailable: {message}"))
        }
        CatalogPersistenceError::Query { message } => {
            Error::internal(format!("catalog error: {message}"))
        }
    }
}

fn already_has_team() -> Error {
    Error::conflict("you already have a team")
}

fn role_counts(picks: &[DraftPick]) -> [(Role, usize); 4] {
    ROLES.map(|role| {
        let count = picks.iter().filter(|pick| pick.role == role).count();
        (role, count)
    })
}

/// Returns a structured [`Error`] naming the first violated rule; the commit
/// itself fails with `conflict` when the user races a second submission past
/// the flag check, and with `internal_error` on any other storage failure
/// (in which case no partial state is retained).
#[async_trait]
impl<U, C, D> DraftCommand for DraftService<U, C, D>
where
    U: UserRepository,
    C: CatalogRepository,
    D: DraftRepository,
{
    async fn create_team(
        &self,
        user_id: UserId,
        raw_name: &str,
        player_ids: &[Uuid],
    ) -> Result<(), Error> {
        let name = TeamName::new(raw_name).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "name" }))
        })?;

        let status = self
            .users
            .draft_status(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        if status.has_team {
            return Err(already_has_team());
        }

        if player_ids.len() != ROSTER_SIZE {
            return Err(Error::invalid_request(format!(
                "you must select exactly {ROSTER_SIZE} players"
            ))
            .with_details(json!({
                "expected": ROSTER_SIZE,
                "actual": player_ids.len(),
            })));
        }

        let distinct: HashSet<&Uuid> = player_ids.iter().collect();
        if distinct.len() != ROSTER_SIZE {
            return Err(
                Error::invalid_request("the same player cannot be drafted twice")
                    .with_details(json!({ "distinct": distinct.len() })),
            );
        }

        let picks = self
            .catalog
            .find_picks(player_ids)
            .await
            .map_err(map_catalog_error)?;
        if picks.len() != ROSTER_SIZE {
            return Err(
                Error::invalid_request("some selected players do not exist").with_details(json!({
                    "requested": ROSTER_SIZE,
                    "found": picks.len(),
                })),
            );
        }

        for (role, actual) in role_counts(&picks) {
            let required = role.quota();
            if actual != required {
                return Err(Error::invalid_request(format!(
                    "invalid roster: need {required} {role}, have {actual}"
                ))
                .with_details(json!({
                    "role": role.code(),
                    "required": required,
                    "actual": actual,
                })));
            }
        }

        let total_cost: i32 = picks.iter().map(|pick| pick.value).sum();
        if total_cost > status.budget {
            return Err(Error::invalid_request(format!(
                "insufficient budget: cost {total_cost}, budget {budget}",
                budget = status.budget
            ))
            .with_details(json!({
                "totalCost": total_cost,
                "budget": status.budget,
            })));
        }

        let commit = TeamCommit {
            team_id: Uuid::new_v4(),
            user_id,
            name,
            player_ids: player_ids.to_vec(),
            total_cost,
        };
        match self.drafts.commit_team(&commit).await {
            Ok(()) => Ok(()),
            Err(DraftCommitError::AlreadyHasTeam) => Err(already_has_team()),
            Err(DraftCommitError::Connection { message }) => Err(Error::service_unavailable(
                format!("draft repository unavailable: {message}"),
            )),
            Err(DraftCommitError::Query { message }) => {
                error!(user_id = %commit.user_id, %message, "team commit failed");
                Err(Error::internal("team creation failed"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Full branch coverage for the draft validation pipeline.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        DraftStatus, MockCatalogRepository, MockDraftRepository, MockUserRepository,
    };
    use rstest::rstest;

    fn pick(role: Role, value: i32) -> DraftPick {
        DraftPick {
            id: Uuid::new_v4(),
            role,
            value,
        }
    }

    /// A roster matching the quota table, with the given per-role values.
    fn valid_picks(gk: [i32; 2], def: [i32; 5], mid: [i32; 5], att: [i32; 3]) -> Vec<DraftPick> {
        let mut picks = Vec::with_capacity(ROSTER_SIZE);
        picks.extend(gk.iter().map(|v| pick(Role::Goalkeeper, *v)));
        picks.extend(def.iter().map(|v| pick(Role::Defender, *v)));
        picks.extend(mid.iter().map(|v| pick(Role::Midfielder, *v)));
        picks.extend(att.iter().map(|v| pick(Role::Attacker, *v)));
        picks
    }

    fn affordable_picks() -> Vec<DraftPick> {
        // 13 + 35 + 39 + 11 = 98, inside the default budget of 100.
        valid_picks(
            [8, 5],
            [10, 8, 7, 6, 4],
            [12, 9, 7, 6, 5],
            [5, 4, 2],
        )
    }

    fn ids_of(picks: &[DraftPick]) -> Vec<Uuid> {
        picks.iter().map(|p| p.id).collect()
    }

    fn users_with_status(status: DraftStatus) -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_draft_status()
            .times(1)
            .return_once(move |_| Ok(Some(status)));
        users
    }

    fn catalog_returning(picks: Vec<DraftPick>) -> MockCatalogRepository {
        let mut catalog = MockCatalogRepository::new();
        catalog
            .expect_find_picks()
            .times(1)
            .return_once(move |_| Ok(picks));
        catalog
    }

    fn untouched_catalog() -> MockCatalogRepository {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_find_picks().times(0);
        catalog
    }

    fn untouched_drafts() -> MockDraftRepository {
        let mut drafts = MockDraftRepository::new();
        drafts.expect_commit_team().times(0);
        drafts
    }

    fn service(
        users: MockUserRepository,
        catalog: MockCatalogRepository,
        drafts: MockDraftRepository,
    ) -> DraftService<MockUserRepository, MockCatalogRepository, MockDraftRepository> {
        DraftService::new(Arc::new(users), Arc::new(catalog), Arc::new(drafts))
    }

    #[tokio::test]
    async fn valid_roster_commits_with_summed_cost() {
        let picks = affordable_picks();
        let ids = ids_of(&picks);
        let user_id = UserId::random();

        let users = users_with_status(DraftStatus {
            budget: 100,
            has_team: false,
        });
        let catalog = catalog_returning(picks);
        let mut drafts = MockDraftRepository::new();
        drafts
            .expect_commit_team()
            .withf(move |commit: &TeamCommit| {
                commit.user_id == user_id
                    && commit.name.as_ref() == "Gli Invincibili"
                    && commit.player_ids.len() == ROSTER_SIZE
                    && commit.total_cost == 98
            })
            .times(1)
            .return_once(|_| Ok(()));

        service(users, catalog, drafts)
            .create_team(user_id, "  Gli Invincibili  ", &ids)
            .await
            .expect("valid roster commits");
    }

    #[rstest]
    #[case("")]
    #[case("A")]
    #[case("1234567890123456789012345678901")]
    #[tokio::test]
    async fn bad_name_fails_before_any_read(#[case] name: &str) {
        let mut users = MockUserRepository::new();
        users.expect_draft_status().times(0);

        let err = service(users, untouched_catalog(), untouched_drafts())
            .create_team(UserId::random(), name, &[])
            .await
            .expect_err("bad name rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert!(err.message.contains("between 2 and 30"));
    }

    #[tokio::test]
    async fn existing_team_is_rejected() {
        let users = users_with_status(DraftStatus {
            budget: 100,
            has_team: true,
        });

        let err = service(users, untouched_catalog(), untouched_drafts())
            .create_team(UserId::random(), "My Team", &[])
            .await
            .expect_err("second team rejected");
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "you already have a team");
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users
            .expect_draft_status()
            .times(1)
            .return_once(|_| Ok(None));

        let err = service(users, untouched_catalog(), untouched_drafts())
            .create_team(UserId::random(), "My Team", &[])
            .await
            .expect_err("missing user rejected");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[rstest]
    #[case(0)]
    #[case(14)]
    #[case(16)]
    #[tokio::test]
    async fn wrong_roster_size_is_rejected(#[case] count: usize) {
        let users = users_with_status(DraftStatus {
            budget: 100,
            has_team: false,
        });
        let ids: Vec<Uuid> = (0..count).map(|_| Uuid::new_v4()).collect();

        let err = service(users, untouched_catalog(), untouched_drafts())
            .create_team(UserId::random(), "My Team", &ids)
            .await
            .expect_err("wrong size rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert!(err.message.contains("exactly 15"));
        let details = err.details.expect("size details");
        assert_eq!(details.get("actual").and_then(|v| v.as_u64()), Some(count as u64));
    }

    #[tokio::test]
    async fn duplicate_ids_fail_before_the_catalog_is_consulted() {
        let users = users_with_status(DraftStatus {
            budget: 100,
            has_team: false,
        });
        let repeated = Uuid::new_v4();
        let mut ids: Vec<Uuid> = (0..13).map(|_| Uuid::new_v4()).collect();
        ids.push(repeated);
        ids.push(repeated);
        assert_eq!(ids.len(), ROSTER_SIZE);

        let err = service(users, untouched_catalog(), untouched_drafts())
            .create_team(UserId::random(), "My Team", &ids)
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert!(err.message.contains("twice"));
    }

    #[tokio::test]
    async fn unknown_players_are_rejected() {
        let users = users_with_status(DraftStatus {
            budget: 100,
            has_team: false,
        });
        let picks = affordable_picks();
        let ids = ids_of(&picks);
        let known: Vec<DraftPick> = picks.into_iter().take(14).collect();
        let catalog = catalog_returning(known);

        let err = service(users, catalog, untouched_drafts())
            .create_team(UserId::random(), "My Team", &ids)
            .await
            .expect_err("unknown player rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert!(err.message.contains("do not exist"));
    }

    #[tokio::test]
    async fn role_surplus_reports_the_first_mismatching_role() {
        // 3 GK and 2 ATT: GK is checked first, so the surplus is what gets
        // reported even though ATT is also short.
        let mut picks = Vec::with_capacity(ROSTER_SIZE);
        picks.extend([8, 5, 6].iter().map(|v| pick(Role::Goalkeeper, *v)));
        picks.extend([10, 8, 7, 6, 4].iter().map(|v| pick(Role::Defender, *v)));
        picks.extend([12, 9, 7, 6, 5].iter().map(|v| pick(Role::Midfielder, *v)));
        picks.extend([15, 11].iter().map(|v| pick(Role::Attacker, *v)));
        assert_eq!(picks.len(), ROSTER_SIZE);
        let ids = ids_of(&picks);

        let users = users_with_status(DraftStatus {
            budget: 200,
            has_team: false,
        });
        let catalog = catalog_returning(picks);

        let err = service(users, catalog, untouched_drafts())
            .create_team(UserId::random(), "My Team", &ids)
            .await
            .expect_err("composition rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.message, "invalid roster: need 2 GK, have 3");
        let details = err.details.expect("composition details");
        assert_eq!(details.get("role").and_then(|v| v.as_str()), Some("GK"));
        assert_eq!(details.get("required").and_then(|v| v.as_u64()), Some(2));
        assert_eq!(details.get("actual").and_then(|v| v.as_u64()), Some(3));
    }

    #[tokio::test]
    async fn over_budget_roster_reports_cost_and_budget() {
        // The worked example: 13 + 35 + 39 + 34 = 121 against a budget of 100.
        let picks = valid_picks([8, 5], [10, 8, 7, 6, 4], [12, 9, 7, 6, 5], [15, 11, 8]);
        let ids = ids_of(&picks);

        let users = users_with_status(DraftStatus {
            budget: 100,
            has_team: false,
        });
        let catalog = catalog_returning(picks);

        let err = service(users, catalog, untouched_drafts())
            .create_team(UserId::random(), "My Team", &ids)
            .await
            .expect_err("over budget rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.message, "insufficient budget: cost 121, budget 100");
        let details = err.details.expect("budget details");
        assert_eq!(details.get("totalCost").and_then(|v| v.as_i64()), Some(121));
        assert_eq!(details.get("budget").and_then(|v| v.as_i64()), Some(100));
    }

    #[rstest]
    #[case(98, true)]
    #[case(97, false)]
    #[tokio::test]
    async fn budget_boundary_is_inclusive(#[case] budget: i32, #[case] succeeds: bool) {
        // The affordable roster costs exactly 98.
        let picks = affordable_picks();
        let ids = ids_of(&picks);

        let users = users_with_status(DraftStatus {
            budget,
            has_team: false,
        });
        let catalog = catalog_returning(picks);
        let mut drafts = MockDraftRepository::new();
        drafts
            .expect_commit_team()
            .times(usize::from(succeeds))
            .returning(|_| Ok(()));

        let result = service(users, catalog, drafts)
            .create_team(UserId::random(), "My Team", &ids)
            .await;
        assert_eq!(result.is_ok(), succeeds);
        if let Err(err) = result {
            assert!(err.message.starts_with("insufficient budget"));
        }
    }

    #[tokio::test]
    async fn commit_unique_violation_surfaces_as_already_has_team() {
        let picks = affordable_picks();
        let ids = ids_of(&picks);

        let users = users_with_status(DraftStatus {
            budget: 100,
            has_team: false,
        });
        let catalog = catalog_returning(picks);
        let mut drafts = MockDraftRepository::new();
        drafts
            .expect_commit_team()
            .times(1)
            .return_once(|_| Err(DraftCommitError::AlreadyHasTeam));

        let err = service(users, catalog, drafts)
            .create_team(UserId::random(), "My Team", &ids)
            .await
            .expect_err("racing commit rejected");
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "you already have a team");
    }

    #[tokio::test]
    async fn commit_storage_failure_is_reported_generically() {
        let picks = affordable_picks();
        let ids = ids_of(&picks);

        let users = users_with_status(DraftStatus {
            budget: 100,
            has_team: false,
        });
        let catalog = catalog_returning(picks);
        let mut drafts = MockDraftRepository::new();
        drafts
            .expect_commit_team()
            .times(1)
            .return_once(|_| Err(DraftCommitError::query("deadlock detected")));

        let err = service(users, catalog, drafts)
            .create_team(UserId::random(), "My Team", &ids)
            .await
            .expect_err("storage failure rejected");
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "team creation failed");
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("boom"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn user_repository_failures_map_to_transport_codes(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut users = MockUserRepository::new();
        users
            .expect_draft_status()
            .times(1)
            .return_once(move |_| Err(failure));

        let err = service(users, untouched_catalog(), untouched_drafts())
            .create_team(UserId::random(), "My Team", &[])
            .await
            .expect_err("repository failure surfaces");
        assert_eq!(err.code, expected);
    }
}
