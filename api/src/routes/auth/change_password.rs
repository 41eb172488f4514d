//! Handler for POST /api/v1/auth/change-password

use actix_web::{web, HttpResponse};
use validator::Validate;

use sl_core::repositories::{ResetTokenRepository, TokenRepository, UserRepository};
use sl_shared::types::MessageResponse;

use crate::dto::auth::ChangePasswordRequest;
use crate::handlers::{bad_request, handle_domain_error};

use super::AppState;

/// Changes a password by proving knowledge of the old one
///
/// Outstanding refresh sessions are revoked by the flow; clients must log
/// in again after a change.
pub async fn change_password<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<ChangePasswordRequest>,
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
        .change_password(&request.email, &request.old_password, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password changed")),
        Err(error) => handle_domain_error(&error),
    }
}
