//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, AccountQuery, TeamCommand, TeamQuery};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub teams: Arc<dyn TeamCommand>,
    pub teams_query: Arc<dyn TeamQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub accounts_query: Arc<dyn AccountQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub teams: Arc<dyn TeamCommand>,
    pub teams_query: Arc<dyn TeamQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub accounts_query: Arc<dyn AccountQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use team_roster::domain::ports::FixtureIdentityVerifier;
    /// use team_roster::domain::{AccountService, TeamService};
    /// use team_roster::inbound::http::state::{HttpState, HttpStatePorts};
    /// use team_roster::outbound::memory::InMemoryRosterStore;
    ///
    /// let store = Arc::new(InMemoryRosterStore::new());
    /// let teams = Arc::new(TeamService::new(store.clone()));
    /// let accounts = Arc::new(AccountService::new(store, Arc::new(FixtureIdentityVerifier)));
    /// let state = HttpState::new(HttpStatePorts {
    ///     teams: teams.clone(),
    ///     teams_query: teams,
    ///     accounts: accounts.clone(),
    ///     accounts_query: accounts,
    /// });
    /// let _teams = state.teams.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            teams,
            teams_query,
            accounts,
            accounts_query,
        } = ports;
        Self {
            teams,
            teams_query,
            accounts,
            accounts_query,
        }
    }
}
