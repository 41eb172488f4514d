//! Handlers for POST /api/v1/auth/reset-request and /api/v1/auth/reset-confirm

use actix_web::{web, HttpResponse};
use validator::Validate;

use sl_core::repositories::{ResetTokenRepository, TokenRepository, UserRepository};
use sl_shared::types::MessageResponse;

use crate::dto::auth::{ResetConfirmRequest, ResetRequest};
use crate::handlers::{bad_request, handle_domain_error};

use super::AppState;

/// Response used whether or not the email is known
const RESET_REQUESTED_MESSAGE: &str =
    "If this email exists, a password reset link has been sent";

/// Starts the password reset flow
///
/// The response body is byte-identical for known and unknown emails. Token
/// delivery belongs to the notification system and is not handled here.
pub async fn reset_request<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<ResetRequest>,
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
        .request_password_reset(&request.email)
        .await
    {
        Ok(_maybe_token) => {
            HttpResponse::Ok().json(MessageResponse::new(RESET_REQUESTED_MESSAGE))
        }
        Err(error) => handle_domain_error(&error),
    }
}

/// Completes the password reset flow
///
/// The token authorizes exactly one change; a used, expired or unknown
/// token yields 401.
pub async fn reset_confirm<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<ResetConfirmRequest>,
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
        .confirm_password_reset(&request.token, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password has been reset")),
        Err(error) => handle_domain_error(&error),
    }
}
