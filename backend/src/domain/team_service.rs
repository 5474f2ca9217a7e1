//! Team roster services.
//!
//! [`TeamService`] implements the team driving ports and owns the roster
//! rules:
//! - a new team's captain is rostered in the same write as the team;
//! - users may only add themselves;
//! - the captain can never leave;
//! - only the captain issues invites.
//!
//! The service keeps no state between calls; the repository is the source of
//! truth.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    InviteIssue, TeamCommand, TeamQuery, TeamRepository, TeamRepositoryError,
};
use crate::domain::{
    Error, NewTeam, RosterAction, RosterEdit, RosterMutation, SearchPage, Team, TeamId,
    TeamInvite, TeamName, UserId,
};

pub(crate) fn map_repository_error(error: TeamRepositoryError) -> Error {
    match error {
        TeamRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("team repository unavailable: {message}"))
        }
        TeamRepositoryError::Query { message } => {
            Error::internal(format!("team repository error: {message}"))
        }
        TeamRepositoryError::Duplicate { message } => {
            Error::conflict("record already exists").with_details(json!({ "constraint": message }))
        }
        TeamRepositoryError::MissingReference { message } => {
            Error::not_found("referenced record not found")
                .with_details(json!({ "constraint": message }))
        }
    }
}

fn team_not_found(team_id: TeamId) -> Error {
    Error::not_found("team not found").with_details(json!({ "teamId": team_id }))
}

fn unexpected_outcome(outcome: RosterMutation) -> Error {
    Error::internal(format!("unexpected roster outcome: {outcome:?}"))
}

/// Team service implementing the team command and query ports.
#[derive(Clone)]
pub struct TeamService<R> {
    team_repo: Arc<R>,
}

impl<R> TeamService<R> {
    /// Create a new service over the team repository.
    pub fn new(team_repo: Arc<R>) -> Self {
        Self { team_repo }
    }
}

impl<R> TeamService<R>
where
    R: TeamRepository,
{
    async fn join(&self, edit: RosterEdit, acting_user: UserId) -> Result<(), Error> {
        if edit.requested_member != Some(acting_user) {
            info!(
                team_id = %edit.team_id,
                user_id = %acting_user,
                requested = ?edit.requested_member.map(UserId::get),
                "rejected roster add for another user"
            );
            return Err(Error::forbidden("not intended user"));
        }

        match self
            .team_repo
            .add_member(edit.team_id, acting_user)
            .await
            .map_err(map_repository_error)?
        {
            RosterMutation::Joined => Ok(()),
            RosterMutation::TeamMissing => Err(team_not_found(edit.team_id)),
            other => Err(unexpected_outcome(other)),
        }
    }

    async fn leave(&self, team_id: TeamId, acting_user: UserId) -> Result<(), Error> {
        match self
            .team_repo
            .remove_member(team_id, acting_user)
            .await
            .map_err(map_repository_error)?
        {
            RosterMutation::Left | RosterMutation::NotMember => Ok(()),
            RosterMutation::CaptainProtected => {
                info!(%team_id, user_id = %acting_user, "captain attempted to leave team");
                Err(Error::policy_violation("captain cannot leave team")
                    .with_details(json!({ "teamId": team_id })))
            }
            RosterMutation::TeamMissing => Err(team_not_found(team_id)),
            other @ RosterMutation::Joined => Err(unexpected_outcome(other)),
        }
    }
}

#[async_trait]
impl<R> TeamCommand for TeamService<R>
where
    R: TeamRepository,
{
    async fn create_team(&self, name: TeamName, acting_user: UserId) -> Result<Team, Error> {
        let team = self
            .team_repo
            .create_team(&NewTeam {
                name,
                captain: acting_user,
            })
            .await
            .map_err(map_repository_error)?;
        info!(team_id = %team.id(), captain = %team.captain(), "team created");
        Ok(team)
    }

    async fn edit_roster(&self, edit: RosterEdit, acting_user: UserId) -> Result<Team, Error> {
        match edit.action {
            RosterAction::Add => self.join(edit, acting_user).await?,
            RosterAction::Remove => self.leave(edit.team_id, acting_user).await?,
        }

        self.team_repo
            .find_team(edit.team_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| team_not_found(edit.team_id))
    }

    async fn create_invite(
        &self,
        team_id: TeamId,
        invitee: UserId,
        acting_user: UserId,
    ) -> Result<TeamInvite, Error> {
        match self
            .team_repo
            .create_invite(team_id, invitee, acting_user)
            .await
            .map_err(map_repository_error)?
        {
            InviteIssue::Issued(invite) => Ok(invite),
            InviteIssue::NotCaptain => {
                info!(%team_id, user_id = %acting_user, "non-captain attempted to invite");
                Err(Error::forbidden("only captain can invite"))
            }
            InviteIssue::TeamMissing => Err(team_not_found(team_id)),
        }
    }
}

#[async_trait]
impl<R> TeamQuery for TeamService<R>
where
    R: TeamRepository,
{
    async fn search_teams(&self, page: SearchPage) -> Result<Vec<Team>, Error> {
        self.team_repo
            .search_by_name(&page)
            .await
            .map_err(map_repository_error)
    }

    async fn teams_for_user(&self, user_id: UserId) -> Result<Vec<Team>, Error> {
        self.team_repo
            .teams_for_member(user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn invites_for_user(&self, user_id: UserId) -> Result<Vec<TeamInvite>, Error> {
        self.team_repo
            .invites_for_user(user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn is_captain(&self, user_id: UserId, team_id: TeamId) -> Result<bool, Error> {
        self.team_repo
            .is_captain(user_id, team_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "team_service_tests.rs"]
mod tests;
