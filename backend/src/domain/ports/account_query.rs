//! Driving port for account reads.

use async_trait::async_trait;

use crate::domain::{AccountSummary, Error, SearchPage};

/// Domain use-case port for searching accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Page through accounts by username prefix.
    async fn search_accounts(&self, page: SearchPage) -> Result<Vec<AccountSummary>, Error>;
}
