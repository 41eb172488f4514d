//! Integration tests for the register and login endpoints

use std::sync::Arc;

use actix_web::{test, web};

use sl_api::app::create_app;
use sl_api::config::Config;
use sl_api::routes::auth::AppState;
use sl_core::repositories::{MockResetTokenRepository, MockTokenRepository, MockUserRepository};
use sl_core::services::auth::{AuthService, AuthServiceConfig};
use sl_core::services::token::{TokenService, TokenServiceConfig};

type TestState = AppState<MockUserRepository, MockTokenRepository, MockResetTokenRepository>;

fn test_state() -> web::Data<TestState> {
    let config = Arc::new(Config::default());
    let token_service = Arc::new(TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig::from(&config.jwt),
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(MockUserRepository::new()),
        token_service,
        Arc::new(MockResetTokenRepository::new()),
        AuthServiceConfig::default(),
    ));

    web::Data::new(AppState {
        auth_service,
        config,
    })
}

fn alice_payload() -> serde_json::Value {
    serde_json::json!({
        "email": "alice@example.com",
        "password": "password123",
        "role": "player",
        "firstName": "Alice",
        "lastName": "Doe",
        "country": "England"
    })
}

#[actix_web::test]
async fn register_returns_tokens_and_sets_cookie() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(alice_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 201);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .expect("refresh cookie is set");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/api/v1/auth"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["accessToken"].as_str().unwrap().len() > 0);
    assert!(body["refreshToken"].as_str().unwrap().len() > 0);
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["role"], "player");
    assert!(body["user"].get("passwordHash").is_none());
}

#[actix_web::test]
async fn duplicate_email_conflicts() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(alice_payload())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(alice_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 409);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["statusCode"], 409);
    assert_eq!(body["error"], "conflict");
}

#[actix_web::test]
async fn unknown_role_is_bad_request() {
    let app = test::init_service(create_app(test_state())).await;

    let mut payload = alice_payload();
    payload["role"] = serde_json::json!("manager");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "bad_request");
}

#[actix_web::test]
async fn login_succeeds_with_correct_credentials() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(alice_payload())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({
            "email": "alice@example.com",
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["firstName"], "Alice");
}

#[actix_web::test]
async fn login_failures_are_byte_identical() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(alice_payload())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({
            "email": "alice@example.com",
            "password": "wrong-password"
        }))
        .to_request();
    let wrong_password = test::call_service(&app, req).await;
    assert_eq!(wrong_password.status(), 401);
    let wrong_password_body = test::read_body(wrong_password).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({
            "email": "nobody@example.com",
            "password": "password123"
        }))
        .to_request();
    let unknown_email = test::call_service(&app, req).await;
    assert_eq!(unknown_email.status(), 401);
    let unknown_email_body = test::read_body(unknown_email).await;

    // no user enumeration through the error body
    assert_eq!(wrong_password_body, unknown_email_body);
}
