//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, Resource, test, web};

use crate::domain::ports::{
    MockAccountCommand, MockAccountQuery, MockTeamCommand, MockTeamQuery,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

const LOGIN_PATH: &str = "/__test/login";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Mocked ports; set expectations on the fields, then call [`Self::into_state`].
#[derive(Default)]
pub struct MockPorts {
    pub teams: MockTeamCommand,
    pub teams_query: MockTeamQuery,
    pub accounts: MockAccountCommand,
    pub accounts_query: MockAccountQuery,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            teams: Arc::new(self.teams),
            teams_query: Arc::new(self.teams_query),
            accounts: Arc::new(self.accounts),
            accounts_query: Arc::new(self.accounts_query),
        }))
    }
}

async fn login_as(session: SessionContext, path: web::Path<i64>) -> ApiResult<HttpResponse> {
    let user_id =
        UserId::new(path.into_inner()).map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Route that stores the path id as the session's acting user.
pub fn login_resource() -> Resource {
    web::resource(format!("{LOGIN_PATH}/{{id}}")).route(web::post().to(login_as))
}

/// Log in through [`login_resource`] and return the issued session cookie.
pub async fn login_cookie<S, B>(app: &S, user_id: i64) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("{LOGIN_PATH}/{user_id}"))
            .to_request(),
    )
    .await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
