//! Store-assigned numeric identifiers.
//!
//! Accounts and teams are keyed by positive 64-bit integers handed out by the
//! store. The newtypes keep the two id spaces apart so a team id can never be
//! passed where a user id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation failure for a raw identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The raw value was not an integer.
    #[error("id must be an integer")]
    NotAnInteger,
    /// The value was zero or negative.
    #[error("id must be positive")]
    NotPositive,
}

fn validate(raw: i64) -> Result<i64, IdValidationError> {
    if raw > 0 {
        Ok(raw)
    } else {
        Err(IdValidationError::NotPositive)
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw store identifier.
            pub fn new(raw: i64) -> Result<Self, IdValidationError> {
                validate(raw).map(Self)
            }

            /// The raw integer value.
            #[must_use]
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = IdValidationError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let parsed = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| IdValidationError::NotAnInteger)?;
                Self::new(parsed)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

numeric_id! {
    /// Identifier of an account (also the acting identity of a request).
    UserId
}

numeric_id! {
    /// Identifier of a team.
    TeamId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("7", Ok(7))]
    #[case(" 42 ", Ok(42))]
    #[case("0", Err(IdValidationError::NotPositive))]
    #[case("-3", Err(IdValidationError::NotPositive))]
    #[case("seven", Err(IdValidationError::NotAnInteger))]
    #[case("", Err(IdValidationError::NotAnInteger))]
    fn parses_user_ids(#[case] raw: &str, #[case] expected: Result<i64, IdValidationError>) {
        assert_eq!(raw.parse::<UserId>().map(UserId::get), expected);
    }

    #[test]
    fn serde_rejects_non_positive_ids() {
        assert!(serde_json::from_str::<TeamId>("0").is_err());
        let id: TeamId = serde_json::from_str("12").expect("valid id");
        assert_eq!(id.get(), 12);
    }
}
