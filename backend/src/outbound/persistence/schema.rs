//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    account (id) {
        id -> Int8,
        /// Unique login name (`account_username_key`).
        username -> Varchar,
        /// Salted digest, never selected into read models.
        password -> Varchar,
        email -> Varchar,
        /// Identity proven through the game platform at sign-up.
        summoner_id -> Int8,
    }
}

diesel::table! {
    /// Teams and their single captain.
    team (id) {
        id -> Int8,
        name -> Varchar,
        captain -> Int8,
    }
}

diesel::table! {
    /// Team membership, unique per `(team_id, user_id)`.
    roster (team_id, user_id) {
        team_id -> Int8,
        user_id -> Int8,
    }
}

diesel::table! {
    /// Advisory invitations issued by captains.
    team_invite (id) {
        id -> Int8,
        team_id -> Int8,
        invitee -> Int8,
    }
}

diesel::joinable!(team -> account (captain));
diesel::joinable!(roster -> team (team_id));
diesel::joinable!(team_invite -> team (team_id));

diesel::allow_tables_to_appear_in_same_query!(account, roster, team, team_invite);
