//! PostgreSQL-backed account repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountSummary, NewAccount, SearchPage};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{AccountRow, AccountSummaryRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::account;

/// Diesel-backed implementation of [`AccountRepository`].
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    AccountRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => AccountRepositoryError::connection(message),
        DieselFailure::UniqueViolation(constraint) => AccountRepositoryError::duplicate(constraint),
        DieselFailure::ForeignKeyViolation(message) | DieselFailure::Query(message) => {
            AccountRepositoryError::query(message)
        }
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn create(&self, new_account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: AccountRow = diesel::insert_into(account::table)
            .values(&NewAccountRow {
                username: new_account.username.as_ref(),
                password: new_account.password.as_str(),
                email: new_account.email.as_ref(),
                summoner_id: new_account.summoner_id.get(),
            })
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Account::try_from(row).map_err(AccountRepositoryError::query)
    }

    async fn search_by_username(
        &self,
        page: &SearchPage,
    ) -> Result<Vec<AccountSummary>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AccountSummaryRow> = account::table
            .filter(account::username.like(page.like_pattern()))
            .select(AccountSummaryRow::as_select())
            .order_by(account::id.asc())
            .limit(page.limit())
            .offset(page.offset())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| AccountSummary::try_from(row).map_err(AccountRepositoryError::query))
            .collect()
    }
}
