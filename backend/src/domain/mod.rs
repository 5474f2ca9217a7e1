//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed entities for accounts, teams, rosters and
//! invites, plus the services that enforce roster consistency. Types are
//! immutable once built and document their invariants and serde contracts in
//! their own Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - Team, TeamInvite, RosterAction: roster vocabulary.
//! - Account, AccountSummary, NewAccount: user records.
//! - TeamService, AccountService: driving port implementations.

pub mod account;
pub mod account_service;
pub mod error;
pub mod ids;
pub mod invite;
pub mod password;
pub mod ports;
pub mod roster;
pub mod search;
pub mod team;
pub mod team_service;
pub mod trace_id;

pub use self::account::{
    Account, AccountSummary, AccountValidationError, Email, NewAccount, SummonerClaim, SummonerId,
    Username,
};
pub use self::account_service::AccountService;
pub use self::error::{EmptyErrorMessage, Error, ErrorCode};
pub use self::ids::{IdValidationError, TeamId, UserId};
pub use self::invite::TeamInvite;
pub use self::password::{Password, PasswordError, PasswordHash};
pub use self::roster::{InvalidRosterAction, RosterAction, RosterEdit, RosterMutation};
pub use self::search::{MAX_OFFSET, PAGE_SIZE, SearchPage, SearchValidationError};
pub use self::team::{NewTeam, Team, TeamName, TeamValidationError};
pub use self::team_service::TeamService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use team_roster::domain::{DomainResult, Error};
///
/// fn check() -> DomainResult<()> {
///     Err(Error::forbidden("only captain can invite"))
/// }
/// assert!(check().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
