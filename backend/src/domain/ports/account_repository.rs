//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Account, AccountSummary, NewAccount, SearchPage};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// The username is already taken.
        Duplicate { message: String } => "account repository uniqueness violation: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account and return it with its assigned id.
    async fn create(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError>;

    /// Accounts whose username starts with the page prefix, ordered by id.
    async fn search_by_username(
        &self,
        page: &SearchPage,
    ) -> Result<Vec<AccountSummary>, AccountRepositoryError>;
}
