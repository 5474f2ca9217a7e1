//! Driving port for team reads.

use async_trait::async_trait;

use crate::domain::{Error, SearchPage, Team, TeamId, TeamInvite, UserId};

/// Domain use-case port for reading teams and invites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamQuery: Send + Sync {
    /// Page through teams by name prefix.
    async fn search_teams(&self, page: SearchPage) -> Result<Vec<Team>, Error>;

    /// Teams the user is rostered on.
    async fn teams_for_user(&self, user_id: UserId) -> Result<Vec<Team>, Error>;

    /// Invites addressed to the user.
    async fn invites_for_user(&self, user_id: UserId) -> Result<Vec<TeamInvite>, Error>;

    /// Whether the user captains the team. Missing teams report `false`.
    async fn is_captain(&self, user_id: UserId, team_id: TeamId) -> Result<bool, Error>;
}
