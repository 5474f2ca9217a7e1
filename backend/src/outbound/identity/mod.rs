//! Identity verification adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `IdentityVerifier` port against the Riot platform API.

mod dto;
mod riot_http_verifier;

pub use riot_http_verifier::RiotHttpVerifier;
