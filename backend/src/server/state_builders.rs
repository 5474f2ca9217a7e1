//! Builders for HTTP state ports.
//!
//! A configured pool selects the Diesel repositories; otherwise every port
//! shares one in-memory store. A configured verifier replaces the fixture
//! verifier.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use team_roster::domain::ports::{
    AccountCommand, AccountQuery, AccountRepository, FixtureIdentityVerifier, IdentityVerifier,
    TeamCommand, TeamQuery, TeamRepository,
};
use team_roster::domain::{AccountService, TeamService};
use team_roster::inbound::http::state::{HttpState, HttpStatePorts};
use team_roster::outbound::memory::InMemoryRosterStore;
use team_roster::outbound::persistence::{DieselAccountRepository, DieselTeamRepository};

use super::ServerConfig;

type TeamPorts = (Arc<dyn TeamCommand>, Arc<dyn TeamQuery>);
type AccountPorts = (Arc<dyn AccountCommand>, Arc<dyn AccountQuery>);

/// Wrap a team repository in the service and split it into both ports.
fn team_ports<R>(repo: Arc<R>) -> TeamPorts
where
    R: TeamRepository + 'static,
{
    let service = Arc::new(TeamService::new(repo));
    (
        service.clone() as Arc<dyn TeamCommand>,
        service as Arc<dyn TeamQuery>,
    )
}

/// Wrap an account repository and verifier in the service and split it into
/// both ports.
fn account_ports<R>(repo: Arc<R>, verifier: Arc<dyn IdentityVerifier>) -> AccountPorts
where
    R: AccountRepository + 'static,
{
    let service = Arc::new(AccountService::new(repo, verifier));
    (
        service.clone() as Arc<dyn AccountCommand>,
        service as Arc<dyn AccountQuery>,
    )
}

fn identity_verifier(config: &ServerConfig) -> Arc<dyn IdentityVerifier> {
    match &config.identity_verifier {
        Some(verifier) => Arc::clone(verifier),
        None => {
            warn!("no identity provider configured; using fixture verifier");
            Arc::new(FixtureIdentityVerifier)
        }
    }
}

/// Build the HTTP state from the configured adapters.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let verifier = identity_verifier(config);
    let ((teams, teams_query), (accounts, accounts_query)) = match &config.db_pool {
        Some(pool) => (
            team_ports(Arc::new(DieselTeamRepository::new(pool.clone()))),
            account_ports(Arc::new(DieselAccountRepository::new(pool.clone())), verifier),
        ),
        None => {
            warn!("no database configured; using in-memory store");
            let store = Arc::new(InMemoryRosterStore::new());
            (
                team_ports(Arc::clone(&store)),
                account_ports(store, verifier),
            )
        }
    };

    web::Data::new(HttpState::new(HttpStatePorts {
        teams,
        teams_query,
        accounts,
        accounts_query,
    }))
}
