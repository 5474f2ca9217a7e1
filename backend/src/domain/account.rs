//! Account data model.
//!
//! Accounts are created once, with a summoner identity proven through the
//! external verifier, and never mutated afterwards.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{PasswordHash, UserId};

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;
/// Maximum allowed length for an email address, matching the column width.
pub const EMAIL_MAX: usize = 255;

/// Validation errors for account fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be between {min} and {max} characters")]
    UsernameLength { min: usize, max: usize },
    #[error("username may only contain letters, numbers, or underscores")]
    UsernameInvalidCharacters,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("email address must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("summoner name must not be empty")]
    EmptySummonerName,
    #[error("verification code must not be empty")]
    EmptyVerificationCode,
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is checked separately.
        Regex::new("^[A-Za-z0-9_]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(raw.into())
    }

    fn from_owned(raw: String) -> Result<Self, AccountValidationError> {
        if raw.trim().is_empty() {
            return Err(AccountValidationError::EmptyUsername);
        }
        let length = raw.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
            return Err(AccountValidationError::UsernameLength {
                min: USERNAME_MIN,
                max: USERNAME_MAX,
            });
        }
        if !username_regex().is_match(&raw) {
            return Err(AccountValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Contact email address. Only the `local@domain.tld` shape and the
/// [`EMAIL_MAX`] length are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(trimmed) {
            return Err(AccountValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Numeric identity assigned by the game platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummonerId(i64);

impl SummonerId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SummonerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name and one-time code presented as proof of a summoner identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummonerClaim {
    summoner_name: String,
    code: String,
}

impl SummonerClaim {
    pub fn new(
        summoner_name: impl Into<String>,
        code: impl Into<String>,
    ) -> Result<Self, AccountValidationError> {
        let summoner_name = summoner_name.into().trim().to_owned();
        let code = code.into().trim().to_owned();
        if summoner_name.is_empty() {
            return Err(AccountValidationError::EmptySummonerName);
        }
        if code.is_empty() {
            return Err(AccountValidationError::EmptyVerificationCode);
        }
        Ok(Self {
            summoner_name,
            code,
        })
    }

    pub fn summoner_name(&self) -> &str {
        &self.summoner_name
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// A stored account as exposed to clients. The password never leaves the
/// store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    id: UserId,
    username: Username,
    email: Email,
    summoner_id: SummonerId,
}

impl Account {
    pub fn new(id: UserId, username: Username, email: Email, summoner_id: SummonerId) -> Self {
        Self {
            id,
            username,
            email,
            summoner_id,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn summoner_id(&self) -> SummonerId {
        self.summoner_id
    }
}

/// Public projection of an account returned by username search; contact
/// details are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    id: UserId,
    username: Username,
    summoner_id: SummonerId,
}

impl AccountSummary {
    pub fn new(id: UserId, username: Username, summoner_id: SummonerId) -> Self {
        Self {
            id,
            username,
            summoner_id,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn summoner_id(&self) -> SummonerId {
        self.summoner_id
    }
}

impl From<Account> for AccountSummary {
    fn from(value: Account) -> Self {
        Self::new(value.id, value.username, value.summoner_id)
    }
}

/// An account ready to be inserted, with its identity already verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: Username,
    pub password: PasswordHash,
    pub email: Email,
    pub summoner_id: SummonerId,
}
