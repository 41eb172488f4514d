//! Token service tests over the in-memory registry

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::token::TokenType;
use crate::domain::entities::user::{User, UserRole};
use crate::errors::{DomainError, TokenError};
use crate::repositories::token::{MockTokenRepository, TokenRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

fn sample_user() -> User {
    User::new(
        "alice@example.com".to_string(),
        "hash".to_string(),
        "Alice".to_string(),
        "Doe".to_string(),
        UserRole::Player,
        None,
        None,
    )
}

fn service() -> TokenService<MockTokenRepository> {
    TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig::new("test-secret"),
    )
}

#[tokio::test]
async fn issued_pair_verifies_with_expected_claims() {
    let service = service();
    let user = sample_user();

    let pair = service.issue_token_pair(&user).await.unwrap();

    let access = service.verify_token(&pair.access_token).unwrap();
    assert_eq!(access.token_type, TokenType::Access);
    assert_eq!(access.user_id().unwrap(), user.id);
    assert_eq!(access.email, user.email);
    assert_eq!(access.role, UserRole::Player);
    assert!(access.jti.is_none());

    let refresh = service.verify_token(&pair.refresh_token).unwrap();
    assert_eq!(refresh.token_type, TokenType::Refresh);
    assert!(refresh.rotation_id().is_some());
    assert!(refresh.exp > access.exp);
}

#[tokio::test]
async fn every_issuance_gets_a_fresh_jti() {
    let service = service();
    let user = sample_user();

    let first = service.issue_token_pair(&user).await.unwrap();
    let second = service.issue_token_pair(&user).await.unwrap();

    let first_jti = service
        .verify_token(&first.refresh_token)
        .unwrap()
        .rotation_id()
        .unwrap();
    let second_jti = service
        .verify_token(&second.refresh_token)
        .unwrap()
        .rotation_id()
        .unwrap();

    assert_ne!(first_jti, second_jti);
}

#[tokio::test]
async fn forged_and_foreign_tokens_are_rejected() {
    let service = service();
    let user = sample_user();
    let pair = service.issue_token_pair(&user).await.unwrap();

    // garbage
    assert!(matches!(
        service.verify_token("not.a.jwt"),
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));

    // signed under a different secret
    let other = TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig::new("other-secret"),
    );
    assert!(other.verify_token(&pair.access_token).is_err());
}

#[tokio::test]
async fn validate_refresh_cross_checks_the_registry() {
    let service = service();
    let user = sample_user();
    let pair = service.issue_token_pair(&user).await.unwrap();
    let claims = service.verify_token(&pair.refresh_token).unwrap();

    assert!(service
        .validate_refresh(&claims, &pair.refresh_token)
        .await
        .unwrap());

    // an access token never validates as a refresh credential
    let access_claims = service.verify_token(&pair.access_token).unwrap();
    assert!(!service
        .validate_refresh(&access_claims, &pair.access_token)
        .await
        .unwrap());

    // a different token string under a stolen jti fails the hash check
    let second = service.issue_token_pair(&user).await.unwrap();
    assert!(!service
        .validate_refresh(&claims, &second.refresh_token)
        .await
        .unwrap());
}

#[tokio::test]
async fn revoked_lease_no_longer_validates() {
    let service = service();
    let user = sample_user();
    let pair = service.issue_token_pair(&user).await.unwrap();
    let claims = service.verify_token(&pair.refresh_token).unwrap();
    let jti = claims.rotation_id().unwrap();

    assert!(service.revoke_refresh_token(jti).await.unwrap());
    assert!(!service
        .validate_refresh(&claims, &pair.refresh_token)
        .await
        .unwrap());
    // flip happens once
    assert!(!service.revoke_refresh_token(jti).await.unwrap());
}

#[tokio::test]
async fn decode_ignoring_expiry_accepts_stale_tokens() {
    let repo = MockTokenRepository::new();
    let mut config = TokenServiceConfig::new("test-secret");
    // already expired at issuance, well past the verifier's leeway
    config.access_token_expiry = -7200;
    config.refresh_token_expiry = -7200;
    let service = TokenService::new(repo, config);
    let user = sample_user();

    let pair = service.issue_token_pair(&user).await.unwrap();

    assert!(matches!(
        service.verify_token(&pair.refresh_token),
        Err(DomainError::Token(TokenError::TokenExpired))
    ));

    let claims = service.decode_ignoring_expiry(&pair.refresh_token).unwrap();
    assert!(claims.exp < Utc::now().timestamp());
    assert!(claims.rotation_id().is_some());

    // the signature is still enforced
    assert!(service.decode_ignoring_expiry("not.a.jwt").is_err());
}

#[tokio::test]
async fn issuance_persists_the_lease() {
    let service = service();
    let user = sample_user();
    let pair = service.issue_token_pair(&user).await.unwrap();
    let claims = service.verify_token(&pair.refresh_token).unwrap();

    let stored = service
        .validate_refresh(&claims, &pair.refresh_token)
        .await
        .unwrap();
    assert!(stored);

    // unknown jti, as if forged with a valid signature but never issued
    let forged_jti = Uuid::new_v4();
    let repo = MockTokenRepository::new();
    assert!(!repo
        .validate(
            forged_jti,
            &TokenService::<MockTokenRepository>::hash_token(&pair.refresh_token),
            user.id
        )
        .await
        .unwrap());
}
