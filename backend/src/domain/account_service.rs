//! Account registration and search services.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountCommand, AccountQuery, AccountRegistration, AccountRepository, AccountRepositoryError,
    IdentityVerificationError, IdentityVerifier,
};
use crate::domain::{
    Account, AccountSummary, Error, NewAccount, Password, PasswordHash, SearchPage,
};

fn map_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::Duplicate { .. } => Error::conflict("username already taken"),
    }
}

/// Run the Argon2 derivation on the blocking pool.
async fn hash_off_executor(password: Password) -> Result<PasswordHash, Error> {
    tokio::task::spawn_blocking(move || password.hash())
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(|err| Error::internal(err.to_string()))
}

fn map_verification_error(error: IdentityVerificationError) -> Error {
    match error {
        IdentityVerificationError::UnknownSummoner { .. } => {
            Error::verification_failed("could not find summoner")
        }
        IdentityVerificationError::CodeMismatch => Error::verification_failed("code does not match"),
        IdentityVerificationError::Unavailable { message }
        | IdentityVerificationError::Decode { message } => {
            warn!(%message, "identity provider failure");
            Error::verification_unavailable("identity provider unavailable")
        }
    }
}

/// Account service implementing the account command and query ports.
pub struct AccountService<R, V: ?Sized> {
    account_repo: Arc<R>,
    verifier: Arc<V>,
}

impl<R, V: ?Sized> Clone for AccountService<R, V> {
    fn clone(&self) -> Self {
        Self {
            account_repo: Arc::clone(&self.account_repo),
            verifier: Arc::clone(&self.verifier),
        }
    }
}

impl<R, V: ?Sized> AccountService<R, V> {
    /// Create a new service over the account repository and verifier.
    pub fn new(account_repo: Arc<R>, verifier: Arc<V>) -> Self {
        Self {
            account_repo,
            verifier,
        }
    }
}

#[async_trait]
impl<R, V> AccountCommand for AccountService<R, V>
where
    R: AccountRepository,
    V: IdentityVerifier + ?Sized,
{
    async fn register(&self, registration: AccountRegistration) -> Result<Account, Error> {
        let AccountRegistration {
            username,
            password,
            email,
            claim,
        } = registration;

        let summoner_id = self
            .verifier
            .verify(&claim)
            .await
            .map_err(map_verification_error)
            .map_err(|err| err.with_details(json!({ "summonerName": claim.summoner_name() })))?;

        let password = hash_off_executor(password).await?;
        let account = self
            .account_repo
            .create(&NewAccount {
                username,
                password,
                email,
                summoner_id,
            })
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %account.id(), %summoner_id, "account created");
        Ok(account)
    }
}

#[async_trait]
impl<R, V> AccountQuery for AccountService<R, V>
where
    R: AccountRepository,
    V: IdentityVerifier + ?Sized,
{
    async fn search_accounts(&self, page: SearchPage) -> Result<Vec<AccountSummary>, Error> {
        self.account_repo
            .search_by_username(&page)
            .await
            .map_err(map_repository_error)
    }
}
