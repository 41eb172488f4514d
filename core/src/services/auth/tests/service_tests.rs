//! Authentication flow tests over the in-memory repositories

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::user::UserRole;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::reset::{MockResetTokenRepository, ResetTokenRepository};
use crate::repositories::token::MockTokenRepository;
use crate::repositories::user::MockUserRepository;
use crate::services::auth::{AuthService, AuthServiceConfig, NewUser};
use crate::services::token::{TokenService, TokenServiceConfig};

type TestAuthService = AuthService<MockUserRepository, MockTokenRepository, MockResetTokenRepository>;

struct Harness {
    auth: TestAuthService,
    reset_repo: Arc<MockResetTokenRepository>,
}

fn harness() -> Harness {
    let user_repo = Arc::new(MockUserRepository::new());
    let token_service = Arc::new(TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig::new("test-secret"),
    ));
    let reset_repo = Arc::new(MockResetTokenRepository::new());

    Harness {
        auth: AuthService::new(
            user_repo,
            token_service,
            reset_repo.clone(),
            AuthServiceConfig::default(),
        ),
        reset_repo,
    }
}

fn alice() -> NewUser {
    NewUser {
        email: "alice@example.com".to_string(),
        password: "password123".to_string(),
        role: UserRole::Player,
        first_name: "Alice".to_string(),
        last_name: "Doe".to_string(),
        country: Some("England".to_string()),
        city: None,
    }
}

fn assert_unauthorized_refresh(result: DomainError) {
    assert!(matches!(
        result,
        DomainError::Token(TokenError::InvalidRefreshToken)
    ));
}

#[tokio::test]
async fn register_then_login() {
    let h = harness();

    let (user, tokens) = h.auth.register(alice()).await.unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert!(!tokens.access_token.is_empty());
    assert!(!tokens.refresh_token.is_empty());

    let (user, _) = h.auth.login("alice@example.com", "password123").await.unwrap();
    assert_eq!(user.role, UserRole::Player);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let h = harness();
    h.auth.register(alice()).await.unwrap();

    let err = h.auth.register(alice()).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::EmailAlreadyRegistered)
    ));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let h = harness();
    h.auth.register(alice()).await.unwrap();

    let wrong_password = h
        .auth
        .login("alice@example.com", "wrong")
        .await
        .unwrap_err();
    let unknown_email = h.auth.login("nobody@example.com", "password123").await.unwrap_err();

    assert!(matches!(
        wrong_password,
        DomainError::Auth(AuthError::AuthenticationFailed)
    ));
    assert!(matches!(
        unknown_email,
        DomainError::Auth(AuthError::AuthenticationFailed)
    ));
}

#[tokio::test]
async fn refresh_rotates_and_old_token_dies() {
    let h = harness();
    let (_, first) = h.auth.register(alice()).await.unwrap();

    let (_, second) = h.auth.refresh(&first.refresh_token).await.unwrap();
    assert_ne!(first.refresh_token, second.refresh_token);

    // the rotated-out token is immediately unusable
    let err = h.auth.refresh(&first.refresh_token).await.unwrap_err();
    assert_unauthorized_refresh(err);

    // the new one works exactly once more
    let (_, third) = h.auth.refresh(&second.refresh_token).await.unwrap();
    let err = h.auth.refresh(&second.refresh_token).await.unwrap_err();
    assert_unauthorized_refresh(err);

    h.auth.refresh(&third.refresh_token).await.unwrap();
}

#[tokio::test]
async fn refresh_rejects_access_tokens() {
    let h = harness();
    let (_, tokens) = h.auth.register(alice()).await.unwrap();

    let err = h.auth.refresh(&tokens.access_token).await.unwrap_err();
    assert_unauthorized_refresh(err);
}

#[tokio::test]
async fn refresh_rejects_garbage() {
    let h = harness();
    h.auth.register(alice()).await.unwrap();

    let err = h.auth.refresh("not.a.token").await.unwrap_err();
    assert_unauthorized_refresh(err);
}

#[tokio::test]
async fn logout_revokes_the_presented_session() {
    let h = harness();
    let (_, tokens) = h.auth.register(alice()).await.unwrap();

    h.auth.logout(Some(&tokens.refresh_token)).await.unwrap();

    // the unexpired token no longer refreshes
    let err = h.auth.refresh(&tokens.refresh_token).await.unwrap_err();
    assert_unauthorized_refresh(err);
}

#[tokio::test]
async fn logout_tolerates_missing_or_broken_tokens() {
    let h = harness();

    h.auth.logout(None).await.unwrap();
    h.auth.logout(Some("garbage")).await.unwrap();
}

#[tokio::test]
async fn reset_flow_changes_password_once() {
    let h = harness();
    h.auth.register(alice()).await.unwrap();

    let token = h
        .auth
        .request_password_reset("alice@example.com")
        .await
        .unwrap()
        .expect("known email yields a token");

    h.auth
        .confirm_password_reset(&token, "new-password-1")
        .await
        .unwrap();

    // the first change holds
    h.auth.login("alice@example.com", "new-password-1").await.unwrap();

    // the token is spent; a second confirm neither succeeds nor changes anything
    let err = h
        .auth
        .confirm_password_reset(&token, "attacker-password")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidResetToken)
    ));
    h.auth.login("alice@example.com", "new-password-1").await.unwrap();
    assert!(h.auth.login("alice@example.com", "attacker-password").await.is_err());
}

#[tokio::test]
async fn reset_request_for_unknown_email_creates_nothing() {
    let h = harness();

    let outcome = h
        .auth
        .request_password_reset("nobody@example.com")
        .await
        .unwrap();
    assert!(outcome.is_none());
}

#[tokio::test]
async fn expired_reset_token_is_rejected() {
    let h = harness();
    let (user, _) = h.auth.register(alice()).await.unwrap();

    // plant a well-formed but stale token directly in the registry
    let token = "stale-reset-token";
    let mut record = crate::domain::entities::reset::PasswordResetToken::new(
        user.id,
        TokenService::<MockTokenRepository>::hash_token(token),
        Duration::minutes(15),
    );
    record.expires_at = Utc::now() - Duration::seconds(1);
    h.reset_repo.save(record).await.unwrap();

    let err = h
        .auth
        .confirm_password_reset(token, "new-password-1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidResetToken)
    ));

    // the original password still works
    h.auth.login("alice@example.com", "password123").await.unwrap();
}

#[tokio::test]
async fn reset_confirm_revokes_outstanding_sessions() {
    let h = harness();
    let (_, session) = h.auth.register(alice()).await.unwrap();

    let token = h
        .auth
        .request_password_reset("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    h.auth
        .confirm_password_reset(&token, "new-password-1")
        .await
        .unwrap();

    let err = h.auth.refresh(&session.refresh_token).await.unwrap_err();
    assert_unauthorized_refresh(err);
}

#[tokio::test]
async fn change_password_requires_the_old_one() {
    let h = harness();
    h.auth.register(alice()).await.unwrap();

    let err = h
        .auth
        .change_password("alice@example.com", "wrong", "new-password-1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::AuthenticationFailed)
    ));

    h.auth
        .change_password("alice@example.com", "password123", "new-password-1")
        .await
        .unwrap();

    // old password dead, new password live
    assert!(h.auth.login("alice@example.com", "password123").await.is_err());
    h.auth.login("alice@example.com", "new-password-1").await.unwrap();
}

#[tokio::test]
async fn change_password_revokes_outstanding_sessions() {
    let h = harness();
    let (_, session) = h.auth.register(alice()).await.unwrap();

    h.auth
        .change_password("alice@example.com", "password123", "new-password-1")
        .await
        .unwrap();

    let err = h.auth.refresh(&session.refresh_token).await.unwrap_err();
    assert_unauthorized_refresh(err);
}

#[tokio::test]
async fn concurrent_refreshes_have_one_winner() {
    let h = harness();
    let (_, tokens) = h.auth.register(alice()).await.unwrap();
    let auth = Arc::new(h.auth);

    let mut handles = Vec::new();
    for _ in 0..4 {
        let auth = auth.clone();
        let token = tokens.refresh_token.clone();
        handles.push(tokio::spawn(async move { auth.refresh(&token).await }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}
