//! Server settings.
//!
//! [`RosterSettings`] layers CLI flags over `ROSTER_*` environment variables
//! over an optional configuration file via OrthoConfig. Session cookie
//! toggles are read straight from the environment by [`session`], so an
//! unset toggle keeps its secure default.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

pub mod session;

pub use session::{
    BuildMode, SessionConfigError, SessionSettings, key_fingerprint, session_settings_from_env,
};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_RIOT_API_BASE: &str = "https://euw1.api.riotgames.com";
const DEFAULT_RIOT_TIMEOUT_MS: u64 = 5_000;

/// Errors raised while interpreting [`RosterSettings`].
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Identity provider connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiotSettings {
    pub base_url: Url,
    pub api_key: String,
    pub timeout: Duration,
}

/// Configuration values for the roster server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct RosterSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL. Without it the server uses the in-memory store.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Riot platform host used for summoner verification.
    pub riot_api_base: Option<String>,
    /// Riot API key. Without it registrations use the local fixture verifier.
    pub riot_api_key: Option<String>,
    /// Per-request timeout for identity lookups, in milliseconds.
    pub riot_timeout_ms: Option<u64>,
}

impl RosterSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// Identity provider settings, present only when an API key is set.
    ///
    /// # Errors
    /// A base URL that does not parse.
    pub fn riot(&self) -> Result<Option<RiotSettings>, SettingsError> {
        let Some(api_key) = self.riot_api_key.clone().filter(|key| !key.trim().is_empty())
        else {
            return Ok(None);
        };
        let raw_base = self
            .riot_api_base
            .as_deref()
            .unwrap_or(DEFAULT_RIOT_API_BASE);
        let base_url = Url::parse(raw_base).map_err(|_| SettingsError::Invalid {
            name: "riot_api_base",
            value: raw_base.to_owned(),
            expected: "absolute http(s) URL",
        })?;
        Ok(Some(RiotSettings {
            base_url,
            api_key,
            timeout: Duration::from_millis(
                self.riot_timeout_ms.unwrap_or(DEFAULT_RIOT_TIMEOUT_MS),
            ),
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for roster settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "ROSTER_BIND_ADDR",
        "ROSTER_DATABASE_URL",
        "ROSTER_DB_POOL_SIZE",
        "ROSTER_RIOT_API_BASE",
        "ROSTER_RIOT_API_KEY",
        "ROSTER_RIOT_TIMEOUT_MS",
    ];

    fn load_with(overrides: &[(&'static str, &str)]) -> RosterSettings {
        let _guard = lock_env(VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        }));
        RosterSettings::load_from_iter([OsString::from("team-roster")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let settings = load_with(&[]);
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert!(settings.database_url.is_none());
        assert_eq!(settings.db_pool_size(), DEFAULT_POOL_SIZE);
        assert!(settings.riot().expect("riot").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("ROSTER_BIND_ADDR", "127.0.0.1:9000"),
            ("ROSTER_DATABASE_URL", "postgres://localhost/roster"),
            ("ROSTER_DB_POOL_SIZE", "4"),
            ("ROSTER_RIOT_API_KEY", "RGAPI-test"),
            ("ROSTER_RIOT_API_BASE", "http://127.0.0.1:9999"),
            ("ROSTER_RIOT_TIMEOUT_MS", "250"),
        ]);
        assert_eq!(settings.bind_addr(), "127.0.0.1:9000".parse().expect("addr"));
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/roster")
        );
        assert_eq!(settings.db_pool_size(), 4);

        let riot = settings.riot().expect("riot").expect("configured");
        assert_eq!(riot.api_key, "RGAPI-test");
        assert_eq!(riot.base_url.as_str(), "http://127.0.0.1:9999/");
        assert_eq!(riot.timeout, Duration::from_millis(250));
    }

    #[rstest]
    fn unparseable_riot_base_is_rejected() {
        let settings = load_with(&[
            ("ROSTER_RIOT_API_KEY", "RGAPI-test"),
            ("ROSTER_RIOT_API_BASE", "not a url"),
        ]);
        assert!(matches!(
            settings.riot(),
            Err(SettingsError::Invalid {
                name: "riot_api_base",
                ..
            })
        ));
    }

    #[rstest]
    fn blank_api_key_keeps_fixture_verifier() {
        let settings = load_with(&[("ROSTER_RIOT_API_KEY", "  ")]);
        assert!(settings.riot().expect("riot").is_none());
    }
}
