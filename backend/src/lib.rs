//! Team roster backend.
//!
//! Users register with a verified game identity, create teams they captain,
//! join and leave rosters, and invite other users. The captain of a team is
//! always on its roster and can never leave it.
//!
//! Layout follows a ports-and-adapters split: [`domain`] holds types,
//! services and ports; [`inbound`] exposes them over HTTP; [`outbound`]
//! implements the ports against PostgreSQL, memory and the Riot API.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
