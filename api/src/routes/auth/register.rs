//! Handler for POST /api/v1/auth/register

use actix_web::{web, HttpResponse};
use validator::Validate;

use sl_core::domain::entities::user::UserRole;
use sl_core::repositories::{ResetTokenRepository, TokenRepository, UserRepository};
use sl_core::services::auth::NewUser;

use crate::dto::auth::{AuthResponse, RegisterRequest, UserView};
use crate::handlers::{bad_request, handle_domain_error};

use super::cookie::refresh_cookie;
use super::AppState;

/// Registers a new account and opens its first session
///
/// Returns 201 with an access/refresh pair and the sanitized user; the
/// refresh token is additionally set as an HTTP-only cookie. A taken email
/// yields 409, an unknown role 400.
pub async fn register<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: ResetTokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return bad_request(&errors.to_string());
    }

    // the role set is closed; unknown names are rejected, never coerced
    let role = match request.role.parse::<UserRole>() {
        Ok(role) => role,
        Err(error) => return bad_request(&error.to_string()),
    };

    let input = NewUser {
        email: request.email.clone(),
        password: request.password.clone(),
        role,
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        country: request.country.clone(),
        city: request.city.clone(),
    };

    match state.auth_service.register(input).await {
        Ok((user, tokens)) => {
            let cookie = refresh_cookie(&state.config, &tokens.refresh_token);
            HttpResponse::Created().cookie(cookie).json(AuthResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                expires_in: tokens.expires_in,
                user: UserView::from(&user),
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}
