//! Team data model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{TeamId, UserId};

/// Maximum number of characters in a team name.
pub const TEAM_NAME_MAX: usize = 64;

/// Validation errors returned when building a [`TeamName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TeamValidationError {
    #[error("team name must not be empty")]
    EmptyName,
    #[error("team name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Human readable team name, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamName(String);

impl TeamName {
    /// Validate and construct a [`TeamName`].
    pub fn new(name: impl Into<String>) -> Result<Self, TeamValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, TeamValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TeamValidationError::EmptyName);
        }
        if trimmed.chars().count() > TEAM_NAME_MAX {
            return Err(TeamValidationError::NameTooLong {
                max: TEAM_NAME_MAX,
            });
        }
        if trimmed.len() == name.len() {
            Ok(Self(name))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }
}

impl AsRef<str> for TeamName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TeamName> for String {
    fn from(value: TeamName) -> Self {
        value.0
    }
}

impl TryFrom<String> for TeamName {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A persisted team.
///
/// ## Invariants
/// - `captain` is always a roster member of the team.
/// - Exactly one captain exists for the lifetime of the team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(rename = "teamId")]
    id: TeamId,
    name: TeamName,
    captain: UserId,
}

impl Team {
    /// Assemble a team from stored components.
    pub fn new(id: TeamId, name: TeamName, captain: UserId) -> Self {
        Self { id, name, captain }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &TeamName {
        &self.name
    }

    /// The single user allowed to issue invites and barred from leaving.
    pub fn captain(&self) -> UserId {
        self.captain
    }

    /// Whether `user` is this team's captain.
    pub fn is_captained_by(&self, user: UserId) -> bool {
        self.captain == user
    }
}

/// A team that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: TeamName,
    pub captain: UserId,
}
