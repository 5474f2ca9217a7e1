//! Port for proving ownership of a game-platform identity.
//!
//! Implementations resolve a summoner by display name and compare the
//! one-time code the user placed on their profile with the code supplied at
//! sign-up.

use async_trait::async_trait;

use crate::domain::{SummonerClaim, SummonerId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity verification adapters.
    pub enum IdentityVerificationError {
        /// The summoner name does not resolve to an identity.
        UnknownSummoner { name: String } => "could not find summoner {name}",
        /// The stored code differs from the supplied one.
        CodeMismatch => "code does not match",
        /// The provider could not be reached or timed out.
        Unavailable { message: String } => "identity provider unavailable: {message}",
        /// The provider answered with an unexpected payload.
        Decode { message: String } => "identity provider response invalid: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify the claim and return the proven summoner id.
    async fn verify(&self, claim: &SummonerClaim) -> Result<SummonerId, IdentityVerificationError>;
}

/// Verifier that accepts every claim whose code equals `"local"` and derives
/// a stable id from the summoner name. Used when no provider is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityVerifier;

/// Code accepted by [`FixtureIdentityVerifier`].
pub const FIXTURE_VERIFICATION_CODE: &str = "local";

#[async_trait]
impl IdentityVerifier for FixtureIdentityVerifier {
    async fn verify(&self, claim: &SummonerClaim) -> Result<SummonerId, IdentityVerificationError> {
        if claim.code() != FIXTURE_VERIFICATION_CODE {
            return Err(IdentityVerificationError::code_mismatch());
        }
        let id = claim
            .summoner_name()
            .bytes()
            .fold(17_i64, |acc, byte| {
                acc.wrapping_mul(31).wrapping_add(i64::from(byte))
            })
            .rem_euclid(i64::from(i32::MAX));
        Ok(SummonerId::new(id))
    }
}
