//! Password handling for account creation.
//!
//! Plaintext passwords live in [`Zeroizing`] buffers and are wiped on drop.
//! Only Argon2id digests in PHC string form reach the store.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{PasswordHasher, SaltString};
use rand::RngCore;
use zeroize::Zeroizing;

/// Minimum number of characters in a password.
pub const PASSWORD_MIN: usize = 8;

const SALT_LEN: usize = 16;

/// Validation and hashing errors for passwords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    #[error("password must be at least {min} characters")]
    TooShort { min: usize },
    #[error("password hashing failed: {message}")]
    Hashing { message: String },
}

/// A plaintext password supplied by a client.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and wrap a plaintext password.
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordError> {
        let raw = Zeroizing::new(raw.into());
        if raw.chars().count() < PASSWORD_MIN {
            return Err(PasswordError::TooShort { min: PASSWORD_MIN });
        }
        Ok(Self(raw))
    }

    /// Derive an Argon2id digest with a fresh random salt.
    ///
    /// This is deliberately slow; call it off the async executor.
    pub fn hash(&self) -> Result<PasswordHash, PasswordError> {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let salt = SaltString::encode_b64(&salt).map_err(hashing_error)?;
        let digest = Argon2::default()
            .hash_password(self.0.as_bytes(), &salt)
            .map_err(hashing_error)?;
        Ok(PasswordHash(digest.to_string()))
    }
}

fn hashing_error(error: argon2::password_hash::Error) -> PasswordError {
    PasswordError::Hashing {
        message: error.to_string(),
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// An Argon2id digest as stored in `account.password`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a candidate password against this digest.
    #[cfg(test)]
    pub(crate) fn verify(&self, candidate: &str) -> bool {
        use argon2::password_hash::{PasswordHash as Phc, PasswordVerifier};

        let Ok(parsed) = Phc::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("short")]
    #[case("1234567")]
    fn rejects_short_passwords(#[case] raw: &str) {
        assert!(matches!(
            Password::new(raw),
            Err(PasswordError::TooShort { min: PASSWORD_MIN })
        ));
    }

    #[test]
    fn hashes_verify_only_the_original_password() {
        let password = Password::new("correct horse").expect("valid password");
        let hash = password.hash().expect("hash");
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hash.verify("correct horse"));
        assert!(!hash.verify("battery staple"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let password = Password::new("correct horse").expect("valid password");
        let first = password.hash().expect("hash");
        let second = password.hash().expect("hash");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn digests_fit_the_password_column() {
        let password = Password::new("x".repeat(512)).expect("valid password");
        assert!(password.hash().expect("hash").as_str().len() <= 255);
    }

    #[test]
    fn debug_output_is_redacted() {
        let password = Password::new("correct horse").expect("valid password");
        assert_eq!(format!("{password:?}"), "Password(<redacted>)");
        assert_eq!(
            format!("{:?}", password.hash().expect("hash")),
            "PasswordHash(<redacted>)"
        );
    }
}
