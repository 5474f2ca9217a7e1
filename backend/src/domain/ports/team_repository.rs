//! Port for team, roster and invite persistence.
//!
//! Check-then-act sequences (captain check before removal or invite,
//! existence check before a roster insert) are pushed down into single
//! adapter calls so an adapter can run each one under one lock or
//! transaction.

use async_trait::async_trait;

use crate::domain::{
    NewTeam, RosterMutation, SearchPage, Team, TeamId, TeamInvite, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by team repository adapters.
    pub enum TeamRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "team repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "team repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Duplicate { message: String } => "team repository uniqueness violation: {message}",
        /// A foreign key referenced a row that does not exist.
        MissingReference { message: String } =>
            "team repository missing reference: {message}",
    }
}

/// Result of an atomic captain check plus invite insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteIssue {
    /// The issuer captains the team and the invite was stored.
    Issued(TeamInvite),
    /// The issuer does not captain the team; nothing was written.
    NotCaptain,
    /// The team does not exist; nothing was written.
    TeamMissing,
}

/// Port for reading and mutating teams and their rosters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a team and its captain's roster row as one unit.
    async fn create_team(&self, team: &NewTeam) -> Result<Team, TeamRepositoryError>;

    /// Fetch a team by identifier.
    async fn find_team(&self, team_id: TeamId) -> Result<Option<Team>, TeamRepositoryError>;

    /// Whether `user_id` is the recorded captain of `team_id`. A missing team
    /// yields `false`.
    async fn is_captain(&self, user_id: UserId, team_id: TeamId)
    -> Result<bool, TeamRepositoryError>;

    /// Insert a roster row if the team exists.
    ///
    /// Returns [`TeamRepositoryError::Duplicate`] when the pair is already
    /// present.
    async fn add_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<RosterMutation, TeamRepositoryError>;

    /// Delete a roster row unless `user_id` captains the team.
    async fn remove_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<RosterMutation, TeamRepositoryError>;

    /// Store an invite if `issued_by` captains the team.
    async fn create_invite(
        &self,
        team_id: TeamId,
        invitee: UserId,
        issued_by: UserId,
    ) -> Result<InviteIssue, TeamRepositoryError>;

    /// Teams whose name starts with the page prefix, ordered by id.
    async fn search_by_name(&self, page: &SearchPage) -> Result<Vec<Team>, TeamRepositoryError>;

    /// Teams whose roster includes `user_id`, ordered by id.
    async fn teams_for_member(&self, user_id: UserId) -> Result<Vec<Team>, TeamRepositoryError>;

    /// Invites addressed to `user_id`, with team names joined in.
    async fn invites_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TeamInvite>, TeamRepositoryError>;

    /// Members of a team, ordered by user id.
    async fn roster(&self, team_id: TeamId) -> Result<Vec<UserId>, TeamRepositoryError>;
}
