//! Team invitations.
//!
//! Invites are advisory: they tell a user that a captain wants them on a
//! team, but joining never requires one.

use serde::{Deserialize, Serialize};

use super::{TeamId, TeamName, UserId};

/// An invitation from a team's captain to another user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInvite {
    team_id: TeamId,
    invitee: UserId,
    /// Populated on reads by joining the team row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    team_name: Option<TeamName>,
}

impl TeamInvite {
    /// An invite as issued, before any team name is joined in.
    pub fn new(team_id: TeamId, invitee: UserId) -> Self {
        Self {
            team_id,
            invitee,
            team_name: None,
        }
    }

    /// Attach the inviting team's name.
    #[must_use]
    pub fn with_team_name(mut self, team_name: TeamName) -> Self {
        self.team_name = Some(team_name);
        self
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    pub fn invitee(&self) -> UserId {
        self.invitee
    }

    pub fn team_name(&self) -> Option<&TeamName> {
        self.team_name.as_ref()
    }
}
