//! Tests for user API handlers.

use super::*;
use crate::domain::{AccountSummary, SummonerId, UserId};
use crate::inbound::http::render::json_config;
use crate::inbound::http::test_utils::{MockPorts, test_session_middleware};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, http::StatusCode, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[derive(Debug)]
struct ValidationExpectation<'a> {
    field: &'a str,
    top_code: &'a str,
}

#[fixture]
fn registration_body() -> Value {
    json!({
        "username": "faker",
        "password": "hunter2222",
        "email": "faker@t1.gg",
        "summonerName": "Faker",
        "code": "open-sesame",
    })
}

fn account(id: i64, username: &str) -> Account {
    Account::new(
        UserId::new(id).expect("fixture id"),
        Username::new(username).expect("fixture username"),
        Email::new("faker@t1.gg").expect("fixture email"),
        SummonerId::new(4242),
    )
}

fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(ports.into_state())
        .app_data(json_config())
        .service(create_user)
        .service(search_users)
}

#[rstest]
#[actix_web::test]
async fn registration_returns_the_account_without_password(registration_body: Value) {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_register()
        .withf(|registration| {
            registration.username.to_string() == "faker"
                && registration.claim.summoner_name() == "Faker"
                && registration.claim.code() == "open-sesame"
        })
        .times(1)
        .returning(|_| Ok(account(1, "faker")));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/user")
            .set_json(&registration_body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.response().cookies().any(|cookie| cookie.name() == "session"),
        "registration should issue a session cookie"
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({ "id": 1, "username": "faker", "email": "faker@t1.gg", "summonerId": 4242 })
    );
}

#[rstest]
#[case("username", json!("ab"), ValidationExpectation { field: "username", top_code: "invalid_request" })]
#[case("password", json!("short"), ValidationExpectation { field: "password", top_code: "invalid_request" })]
#[case("email", json!("not-an-email"), ValidationExpectation { field: "email", top_code: "invalid_request" })]
#[case("email", json!(format!("{}@example.com", "a".repeat(300))), ValidationExpectation { field: "email", top_code: "invalid_request" })]
#[case("summonerName", json!(" "), ValidationExpectation { field: "summonerName", top_code: "invalid_request" })]
#[case("code", json!(""), ValidationExpectation { field: "code", top_code: "invalid_request" })]
#[actix_web::test]
async fn invalid_registrations_name_the_field(
    registration_body: Value,
    #[case] key: &str,
    #[case] value: Value,
    #[case] expected: ValidationExpectation<'_>,
) {
    let mut ports = MockPorts::default();
    ports.accounts.expect_register().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let mut body = registration_body;
    body[key] = value;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/user")
            .set_json(&body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        payload.get("code").and_then(Value::as_str),
        Some(expected.top_code)
    );
    assert_eq!(
        payload["details"].get("field").and_then(Value::as_str),
        Some(expected.field)
    );
}

#[rstest]
#[case(Error::verification_failed("verification code does not match"), StatusCode::BAD_REQUEST)]
#[case(Error::verification_unavailable("identity provider timed out"), StatusCode::BAD_GATEWAY)]
#[case(Error::conflict("record already exists"), StatusCode::CONFLICT)]
#[actix_web::test]
async fn registration_failures_keep_their_status(
    registration_body: Value,
    #[case] error: Error,
    #[case] status: StatusCode,
) {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_register()
        .times(1)
        .returning(move |_| Err(error.clone()));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/user")
            .set_json(&registration_body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), status);
    assert!(
        response.response().cookies().all(|cookie| cookie.name() != "session"),
        "failed registrations must not sign anyone in"
    );
}

#[actix_web::test]
async fn search_returns_summaries_only() {
    let mut ports = MockPorts::default();
    ports
        .accounts_query
        .expect_search_accounts()
        .withf(|page| page.prefix() == "fa" && page.offset() == 0)
        .times(1)
        .returning(|_| Ok(vec![AccountSummary::from(account(1, "faker"))]));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/user/search/fa/0")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!([{ "id": 1, "username": "faker", "summonerId": 4242 }])
    );
}

#[actix_web::test]
async fn search_rejects_offsets_past_the_cap() {
    let mut ports = MockPorts::default();
    ports.accounts_query.expect_search_accounts().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/user/search/fa/20000")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
