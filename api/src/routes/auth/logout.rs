//! Handler for POST /api/v1/auth/logout

use actix_web::{web, HttpRequest, HttpResponse};

use sl_core::repositories::{ResetTokenRepository, TokenRepository, UserRepository};
use sl_shared::types::MessageResponse;

use crate::dto::auth::LogoutRequest;
use crate::handlers::handle_domain_error;

use super::cookie::{clear_refresh_cookie, extract_refresh_token};
use super::AppState;

/// Tears down a session
///
/// Succeeds whether or not a refresh token was presented; an expired token
/// is still decoded so the stale lease gets revoked. The cookie is cleared
/// unconditionally.
pub async fn logout<U, T, P>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, P>>,
    request: Option<web::Json<LogoutRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: ResetTokenRepository + 'static,
{
    let body_token = request.and_then(|r| r.refresh_token.clone());
    let token = extract_refresh_token(&req, body_token, &state.config);

    match state.auth_service.logout(token.as_deref()).await {
        Ok(()) => HttpResponse::Ok()
            .cookie(clear_refresh_cookie(&state.config))
            .json(MessageResponse::new("Logged out")),
        Err(error) => handle_domain_error(&error),
    }
}
