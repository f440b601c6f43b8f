//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    fantasy_team_players, fantasy_teams, real_players, schools, users, verification_tokens,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub budget: i32,
    pub has_team: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub display_name: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

/// Changeset replacing the three profile name columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProfileNamesUpdate<'a> {
    pub display_name: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

/// Row struct for reading schools.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schools)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SchoolRow {
    pub id: Uuid,
    pub name: String,
}

/// Insertable struct for seeding schools.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schools)]
pub(crate) struct NewSchoolRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
}

/// Row struct for the player catalog joined with the school name.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct CatalogPlayerRow {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub value: i32,
    pub school_name: String,
}

/// Row struct for resolving draft picks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = real_players)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DraftPickRow {
    pub id: Uuid,
    pub role: String,
    pub value: i32,
}

/// Insertable struct for seeding players.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = real_players)]
pub(crate) struct NewRealPlayerRow<'a> {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: &'a str,
    pub role: &'a str,
    pub value: i32,
}

/// Insertable struct for the team row of a draft commit.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = fantasy_teams)]
pub(crate) struct NewFantasyTeamRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
}

/// Insertable struct for one roster link of a draft commit.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = fantasy_team_players)]
pub(crate) struct NewRosterLinkRow {
    pub team_id: Uuid,
    pub real_player_id: Uuid,
}

/// Row struct for verification tokens.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = verification_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VerificationTokenRow {
    pub identifier: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Insertable struct for verification tokens.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = verification_tokens)]
pub(crate) struct NewVerificationTokenRow<'a> {
    pub identifier: &'a str,
    pub token: &'a str,
    pub expires_at: DateTime<Utc>,
}
