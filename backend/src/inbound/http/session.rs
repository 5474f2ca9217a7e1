//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The acting user is whatever id the signed session cookie carries under
//! `user_id`. Registration issues the cookie for the new account; beyond that
//! this crate only reads it. Request bodies never override it.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist a user id in the session cookie.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the acting user id, if the cookie carries a valid one.
    ///
    /// Values that do not decode to a positive integer are logged and
    /// treated as absent.
    pub fn user_id(&self) -> Option<UserId> {
        let raw = match self.0.get::<i64>(USER_ID_KEY) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "unreadable user id in session cookie");
                return None;
            }
        };
        match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, raw, "invalid user id in session cookie");
                None
            }
        }
    }

    /// Require an acting user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/require",
                web::get().to(|session: SessionContext| async move {
                    let id = session.require_user_id()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                }),
            )
    }

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = test::init_service(session_test_app().route(
            "/set",
            web::get().to(|session: SessionContext| async move {
                session.persist_user(UserId::new(7).expect("fixture id"))?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        assert_eq!(test::read_body(get_res).await, "7");
    }

    #[actix_web::test]
    async fn missing_user_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case::not_a_number(serde_json::json!("seven"))]
    #[case::zero(serde_json::json!(0))]
    #[case::negative(serde_json::json!(-3))]
    #[actix_web::test]
    async fn tampered_user_id_is_unauthorised(#[case] stored: serde_json::Value) {
        let app = test::init_service(session_test_app().route(
            "/set-invalid",
            web::get().to(move |session: Session| {
                let stored = stored.clone();
                async move {
                    session
                        .insert(USER_ID_KEY, stored)
                        .expect("set invalid user id");
                    HttpResponse::Ok()
                }
            }),
        ))
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
