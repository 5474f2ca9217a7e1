//! Roster mutation vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{TeamId, UserId};

/// Raised when a roster edit names an action other than `add` or `remove`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("action is not valid")]
pub struct InvalidRosterAction;

/// The two roster mutations a member may perform on themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterAction {
    Add,
    Remove,
}

impl RosterAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

impl FromStr for RosterAction {
    type Err = InvalidRosterAction;

    /// Matching is exact; `"Add"` and `" add"` are rejected.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            _ => Err(InvalidRosterAction),
        }
    }
}

impl fmt::Display for RosterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request to change a team roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEdit {
    pub action: RosterAction,
    pub team_id: TeamId,
    /// The user the caller asked to move; only the caller themselves may be
    /// added.
    pub requested_member: Option<UserId>,
}

/// Outcome reported by the store for a roster write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterMutation {
    /// A roster row was inserted.
    Joined,
    /// A roster row was deleted.
    Left,
    /// Removal requested for a user who was not on the roster; nothing changed.
    NotMember,
    /// Removal refused because the user captains the team; nothing changed.
    CaptainProtected,
    /// The team does not exist; nothing changed.
    TeamMissing,
}
