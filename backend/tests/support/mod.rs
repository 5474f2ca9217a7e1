//! Shared helpers for HTTP integration tests.
//!
//! Tests drive the real handlers over an in-memory store. Sessions are
//! issued by a test-only login route, since this service only reads them.

use std::sync::Arc;

use actix_http::Request;
use actix_session::SessionMiddleware;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, HttpResponse, test as actix_test, web};
use async_trait::async_trait;
use serde_json::Value;
use team_roster::domain::ports::{IdentityVerificationError, IdentityVerifier};
use team_roster::domain::{AccountService, Error, SummonerClaim, SummonerId, TeamService, UserId};
use team_roster::inbound::http::ApiResult;
use team_roster::inbound::http::health::root;
use team_roster::inbound::http::invites::{create_invite, invites_by_user};
use team_roster::inbound::http::render::json_config;
use team_roster::inbound::http::session::SessionContext;
use team_roster::inbound::http::state::{HttpState, HttpStatePorts};
use team_roster::inbound::http::teams::{create_team, edit_roster, search_teams, teams_by_user};
use team_roster::inbound::http::users::{create_user, search_users};
use team_roster::outbound::memory::InMemoryRosterStore;

/// Code the stub verifier accepts.
pub const STUB_CODE: &str = "verified";

/// Verifier that accepts [`STUB_CODE`] and rejects everything else.
pub struct StubVerifier;

#[async_trait]
impl IdentityVerifier for StubVerifier {
    async fn verify(&self, claim: &SummonerClaim) -> Result<SummonerId, IdentityVerificationError> {
        if claim.code() == STUB_CODE {
            let id = i64::try_from(claim.summoner_name().len()).unwrap_or(i64::MAX);
            Ok(SummonerId::new(1000 + id))
        } else {
            Err(IdentityVerificationError::code_mismatch())
        }
    }
}

async fn login_as(session: SessionContext, path: web::Path<i64>) -> ApiResult<HttpResponse> {
    let user_id =
        UserId::new(path.into_inner()).map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Build HTTP state over `store` with the stub verifier.
pub fn state_over(store: &Arc<InMemoryRosterStore>) -> web::Data<HttpState> {
    let teams = Arc::new(TeamService::new(Arc::clone(store)));
    let accounts = Arc::new(AccountService::new(Arc::clone(store), Arc::new(StubVerifier)));
    web::Data::new(HttpState::new(HttpStatePorts {
        teams: teams.clone(),
        teams_query: teams,
        accounts: accounts.clone(),
        accounts_query: accounts,
    }))
}

/// Initialise the full route table with session and trace middleware.
pub async fn init_app(
    state: web::Data<HttpState>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .build();

    actix_test::init_service(
        App::new()
            .app_data(state)
            .app_data(json_config())
            .wrap(team_roster::Trace)
            .service(root)
            .service(
                web::scope("")
                    .wrap(session)
                    .route("/__test/login/{id}", web::post().to(login_as))
                    .service(create_team)
                    .service(search_teams)
                    .service(teams_by_user)
                    .service(edit_roster)
                    .service(create_invite)
                    .service(invites_by_user)
                    .service(create_user)
                    .service(search_users),
            ),
    )
    .await
}

/// Response status plus decoded JSON body, if any.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

async fn send<S>(app: &S, request: actix_test::TestRequest) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status().as_u16();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    Reply { status, body }
}

/// Session cookie for `user_id`.
pub async fn login<S>(app: &S, user_id: i64) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/__test/login/{user_id}"))
            .to_request(),
    )
    .await;
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

pub async fn get<S>(app: &S, uri: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    send(app, actix_test::TestRequest::get().uri(uri)).await
}

pub async fn post<S>(app: &S, uri: &str, cookie: Option<Cookie<'static>>, body: Value) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let mut request = actix_test::TestRequest::post().uri(uri).set_json(body);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie);
    }
    send(app, request).await
}

pub async fn put<S>(app: &S, uri: &str, cookie: Cookie<'static>, body: Value) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    send(
        app,
        actix_test::TestRequest::put()
            .uri(uri)
            .cookie(cookie)
            .set_json(body),
    )
    .await
}

/// Register `count` accounts named `player01`, `player02`, ... so ids run
/// from 1 to `count`.
pub async fn register_players<S>(app: &S, count: usize)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    for n in 1..=count {
        let reply = post(
            app,
            "/user",
            None,
            serde_json::json!({
                "username": format!("player{n:02}"),
                "password": "correct horse",
                "email": format!("player{n:02}@example.com"),
                "summonerName": format!("Summoner {n}"),
                "code": STUB_CODE,
            }),
        )
        .await;
        assert_eq!(reply.status, 200, "registration {n} failed: {:?}", reply.body);
    }
}
