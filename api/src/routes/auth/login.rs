//! Handler for POST /api/v1/auth/login

use actix_web::{web, HttpResponse};
use validator::Validate;

use sl_core::repositories::{ResetTokenRepository, TokenRepository, UserRepository};

use crate::dto::auth::{AuthResponse, LoginRequest, UserView};
use crate::handlers::{bad_request, handle_domain_error};

use super::cookie::refresh_cookie;
use super::AppState;

/// Opens a session for an existing account
///
/// Every verification failure, including an unknown email, maps to the same
/// 401 body.
pub async fn login<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: ResetTokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return bad_request(&errors.to_string());
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
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
