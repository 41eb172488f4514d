//! Handler for POST /api/v1/auth/refresh

use actix_web::{web, HttpRequest, HttpResponse};

use sl_core::errors::{DomainError, TokenError};
use sl_core::repositories::{ResetTokenRepository, TokenRepository, UserRepository};

use crate::dto::auth::{AuthResponse, RefreshRequest, UserView};
use crate::handlers::handle_domain_error;

use super::cookie::{extract_refresh_token, refresh_cookie};
use super::AppState;

/// Exchanges a refresh token for a new pair
///
/// The token is read from the body when present, from the cookie otherwise.
/// Rotation makes the presented token immediately unusable; the cookie is
/// replaced with the new one. A missing token fails like an invalid one.
pub async fn refresh<U, T, P>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, P>>,
    request: Option<web::Json<RefreshRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: ResetTokenRepository + 'static,
{
    let body_token = request.and_then(|r| r.refresh_token.clone());
    let token = match extract_refresh_token(&req, body_token, &state.config) {
        Some(token) => token,
        None => {
            return handle_domain_error(&DomainError::Token(TokenError::InvalidRefreshToken))
        }
    };

    match state.auth_service.refresh(&token).await {
        Ok((user, tokens)) => {
            let cookie = refresh_cookie(&state.config, &tokens.refresh_token);
            HttpResponse::Ok().cookie(cookie).json(AuthResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                expires_in: tokens.expires_in,
                user: UserView::from(&user),
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}
