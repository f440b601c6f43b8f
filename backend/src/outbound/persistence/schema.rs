//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered users with credentials, profile fields, and draft state.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique email address, stored lowercase.
        email -> Text,
        /// bcrypt hash; NULL for federated-only accounts.
        password_hash -> Nullable<Text>,
        /// Free-form display name (max 100 characters).
        display_name -> Nullable<Varchar>,
        /// Given name (max 50 characters).
        first_name -> Nullable<Varchar>,
        /// Family name (max 50 characters).
        last_name -> Nullable<Varchar>,
        /// When the email address was verified.
        email_verified_at -> Nullable<Timestamptz>,
        /// Remaining draft budget in credits.
        budget -> Int4,
        /// Whether the user has drafted their team.
        has_team -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Federated identity links, written by the provider callback.
    accounts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Provider code, e.g. `google`.
        provider -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Schools owning the draftable players.
    schools (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique school name.
        name -> Text,
    }
}

diesel::table! {
    /// The draftable player catalog; immutable after seeding.
    real_players (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning school.
        school_id -> Uuid,
        /// Player name, unique within the school.
        name -> Text,
        /// Roster position code (`GK`, `DEF`, `MID`, `ATT`).
        role -> Text,
        /// Draft cost in credits; strictly positive.
        value -> Int4,
    }
}

diesel::table! {
    /// Fantasy teams; `user_id` is unique so a user can own at most one.
    fantasy_teams (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user; unique.
        user_id -> Uuid,
        /// Team name (2 to 30 characters).
        name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Roster links: fifteen per team, one per drafted player.
    fantasy_team_players (team_id, real_player_id) {
        /// Owning team.
        team_id -> Uuid,
        /// Drafted player.
        real_player_id -> Uuid,
    }
}

diesel::table! {
    /// Pending email verification tokens.
    verification_tokens (identifier, token) {
        /// Operation identifier, e.g. `email-change:<user_id>:<new_email>`.
        identifier -> Text,
        /// Opaque token value handed to the user.
        token -> Text,
        /// Expiry instant.
        expires_at -> Timestamptz,
    }
}

diesel::joinable!(accounts -> users (user_id));
diesel::joinable!(real_players -> schools (school_id));
diesel::joinable!(fantasy_teams -> users (user_id));
diesel::joinable!(fantasy_team_players -> fantasy_teams (team_id));
diesel::joinable!(fantasy_team_players -> real_players (real_player_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    accounts,
    schools,
    real_players,
    fantasy_teams,
    fantasy_team_players,
    verification_tokens,
);
