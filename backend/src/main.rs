//! Backend entry-point: loads settings, prepares adapters and serves the
//! roster API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use team_roster::config::{
    BuildMode, RosterSettings, key_fingerprint, session_settings_from_env,
};
use team_roster::inbound::http::health::HealthState;
use team_roster::outbound::identity::RiotHttpVerifier;
use team_roster::outbound::persistence::{DbPool, PoolConfig, apply_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        RosterSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let config = server_config(&settings).await?;
    let bind_addr = settings.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "roster API listening");
    server.await.wrap_err("server terminated with an error")
}

async fn server_config(settings: &RosterSettings) -> Result<ServerConfig> {
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
    );

    if let Some(database_url) = settings.database_url.clone() {
        let applied = apply_migrations(database_url.clone())
            .await
            .wrap_err("failed to apply migrations")?;
        info!(applied, "database schema up to date");
        let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.db_pool_size()))
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    if let Some(riot) = settings.riot()? {
        info!(base_url = %riot.base_url, "using Riot identity verification");
        let verifier = RiotHttpVerifier::new(riot.base_url, riot.api_key, riot.timeout)
            .wrap_err("failed to build identity provider client")?;
        config = config.with_identity_verifier(Arc::new(verifier));
    }

    Ok(config)
}
