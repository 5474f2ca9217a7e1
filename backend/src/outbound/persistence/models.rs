//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types re-run
//! domain validation so a corrupt row surfaces as a query error instead of
//! leaking an invalid value.

use diesel::prelude::*;

use crate::domain::{
    Account, AccountSummary, Email, SummonerId, Team, TeamId, TeamInvite, TeamName, UserId,
    Username,
};

use super::schema::{account, roster, team, team_invite};

/// Row struct for reading from the team table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = team)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TeamRow {
    pub id: i64,
    pub name: String,
    pub captain: i64,
}

impl TryFrom<TeamRow> for Team {
    type Error = String;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        let id = TeamId::new(row.id).map_err(|err| format!("team.id: {err}"))?;
        let name = TeamName::new(row.name).map_err(|err| format!("team.name: {err}"))?;
        let captain = UserId::new(row.captain).map_err(|err| format!("team.captain: {err}"))?;
        Ok(Self::new(id, name, captain))
    }
}

/// Insertable struct for creating team records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = team)]
pub(crate) struct NewTeamRow<'a> {
    pub name: &'a str,
    pub captain: i64,
}

/// Insertable struct for roster membership.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = roster)]
pub(crate) struct RosterRow {
    pub team_id: i64,
    pub user_id: i64,
}

/// Insertable struct for invites.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = team_invite)]
pub(crate) struct NewTeamInviteRow {
    pub team_id: i64,
    pub invitee: i64,
}

/// Invite joined with its team name.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct InviteWithTeamRow {
    pub team_id: i64,
    pub invitee: i64,
    pub team_name: String,
}

impl TryFrom<InviteWithTeamRow> for TeamInvite {
    type Error = String;

    fn try_from(row: InviteWithTeamRow) -> Result<Self, Self::Error> {
        let team_id =
            TeamId::new(row.team_id).map_err(|err| format!("team_invite.team_id: {err}"))?;
        let invitee =
            UserId::new(row.invitee).map_err(|err| format!("team_invite.invitee: {err}"))?;
        let team_name = TeamName::new(row.team_name).map_err(|err| format!("team.name: {err}"))?;
        Ok(Self::new(team_id, invitee).with_team_name(team_name))
    }
}

/// Row struct for reading accounts back after insert. The password column is
/// deliberately absent.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = account)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub summoner_id: i64,
}

impl TryFrom<AccountRow> for Account {
    type Error = String;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let id = UserId::new(row.id).map_err(|err| format!("account.id: {err}"))?;
        let username =
            Username::new(row.username).map_err(|err| format!("account.username: {err}"))?;
        let email = Email::new(row.email).map_err(|err| format!("account.email: {err}"))?;
        Ok(Self::new(id, username, email, SummonerId::new(row.summoner_id)))
    }
}

/// Search projection of an account.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = account)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountSummaryRow {
    pub id: i64,
    pub username: String,
    pub summoner_id: i64,
}

impl TryFrom<AccountSummaryRow> for AccountSummary {
    type Error = String;

    fn try_from(row: AccountSummaryRow) -> Result<Self, Self::Error> {
        let id = UserId::new(row.id).map_err(|err| format!("account.id: {err}"))?;
        let username =
            Username::new(row.username).map_err(|err| format!("account.username: {err}"))?;
        Ok(Self::new(id, username, SummonerId::new(row.summoner_id)))
    }
}

/// Insertable struct for new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = account)]
pub(crate) struct NewAccountRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
    pub summoner_id: i64,
}
