//! Driving port for team and roster mutations.
//!
//! Every method takes the acting user explicitly. Inbound adapters must pass
//! the identity established by the session layer, never one read from a
//! request body.

use async_trait::async_trait;

use crate::domain::{Error, RosterEdit, Team, TeamId, TeamInvite, TeamName, UserId};

/// Domain use-case port for changing teams.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamCommand: Send + Sync {
    /// Create a team captained by `acting_user`, who joins its roster.
    async fn create_team(&self, name: TeamName, acting_user: UserId) -> Result<Team, Error>;

    /// Add or remove `acting_user` on a roster and return the stored team.
    async fn edit_roster(&self, edit: RosterEdit, acting_user: UserId) -> Result<Team, Error>;

    /// Invite `invitee` to a team captained by `acting_user`.
    async fn create_invite(
        &self,
        team_id: TeamId,
        invitee: UserId,
        acting_user: UserId,
    ) -> Result<TeamInvite, Error>;
}
