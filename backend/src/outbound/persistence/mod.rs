//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories here implement the team and account ports against
//! PostgreSQL via `diesel-async` and `bb8`.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain types. Roster rules stay in the domain; adapters only guarantee
//!   that each check-then-act port call runs in one locked transaction.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: Diesel and pool failures become port errors; raw
//!   database messages are logged, not returned.
//!
//! # Example
//!
//! ```rust,no_run
//! use team_roster::outbound::persistence::{DbPool, DieselTeamRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/roster")).await?;
//! let teams = DieselTeamRepository::new(pool);
//! # let _ = teams;
//! # Ok(())
//! # }
//! ```

mod diesel_account_repository;
mod diesel_error_mapping;
mod diesel_team_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_team_repository::DieselTeamRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
