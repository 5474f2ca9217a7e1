//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_query;
mod account_repository;
mod identity_verifier;
mod team_command;
mod team_query;
mod team_repository;

pub use account_command::{AccountCommand, AccountRegistration};
#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_query::AccountQuery;
#[cfg(test)]
pub use account_query::MockAccountQuery;
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{
    FIXTURE_VERIFICATION_CODE, FixtureIdentityVerifier, IdentityVerificationError,
    IdentityVerifier,
};
#[cfg(test)]
pub use team_command::MockTeamCommand;
pub use team_command::TeamCommand;
#[cfg(test)]
pub use team_query::MockTeamQuery;
pub use team_query::TeamQuery;
#[cfg(test)]
pub use team_repository::MockTeamRepository;
pub use team_repository::{InviteIssue, TeamRepository, TeamRepositoryError};
