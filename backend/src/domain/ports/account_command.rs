//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Account, Email, Error, Password, SummonerClaim, Username};

/// Validated sign-up payload.
#[derive(Debug, Clone)]
pub struct AccountRegistration {
    pub username: Username,
    pub password: Password,
    pub email: Email,
    pub claim: SummonerClaim,
}

/// Domain use-case port for registering accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Verify the summoner claim and store the account.
    async fn register(&self, registration: AccountRegistration) -> Result<Account, Error>;
}
