//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod invites;
pub mod render;
pub mod schemas;
pub mod session;
pub mod state;
pub mod teams;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;
