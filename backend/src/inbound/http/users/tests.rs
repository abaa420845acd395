//! Tests for login and logout handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::{ErrorCode, UserId};
use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};
use crate::test_support::member;

fn ports_authenticating(outcome: Result<UserId, Error>) -> MockPorts {
    let mut ports = MockPorts::signed_in_as(&member("alice"));
    ports
        .login
        .expect_authenticate()
        .return_once(move |_| outcome);
    ports
}

fn test_app(
    ports: MockPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(ports.into_state())
        .wrap(test_session_middleware())
        .service(login)
        .service(logout)
}

fn login_request(username: &str, password: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/login")
        .set_json(&LoginRequest {
            username: username.into(),
            password: password.into(),
        })
        .to_request()
}

#[actix_web::test]
async fn successful_login_sets_session_cookie() {
    let app = actix_test::init_service(test_app(ports_authenticating(Ok(UserId::random())))).await;

    let response = actix_test::call_service(&app, login_request("alice", "secret")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!session_cookie(&response).value().is_empty());
}

#[actix_web::test]
async fn rejected_credentials_are_unauthorised() {
    let app = actix_test::init_service(test_app(ports_authenticating(Err(
        Error::unauthorized("invalid credentials"),
    ))))
    .await;

    let response = actix_test::call_service(&app, login_request("alice", "wrong")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("   ", "secret", "username")]
#[case("alice", "", "password")]
#[actix_web::test]
async fn blank_fields_are_bad_requests(
    #[case] username: &str,
    #[case] password: &str,
    #[case] field: &str,
) {
    let mut ports = MockPorts::signed_in_as(&member("alice"));
    ports.login.expect_authenticate().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(&app, login_request(username, password)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    let code: ErrorCode = serde_json::from_value(value["code"].clone()).expect("error code");
    assert_eq!(code, ErrorCode::InvalidRequest);
    assert_eq!(value["details"]["field"], field);
}

#[actix_web::test]
async fn logout_drops_the_session() {
    let app = actix_test::init_service(test_app(ports_authenticating(Ok(UserId::random())))).await;
    let login_response = actix_test::call_service(&app, login_request("alice", "secret")).await;
    let cookie = session_cookie(&login_response);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(session_cookie(&response).value().is_empty());
}
