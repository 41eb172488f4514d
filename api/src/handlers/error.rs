//! Domain error normalization
//!
//! Every flow failure is mapped here, once, to the coarse taxonomy and the
//! stable `{statusCode, error, message}` body. Raw registry or verifier
//! detail never reaches the caller.

use actix_web::HttpResponse;

use sl_core::errors::{AuthError, DomainError};
use sl_shared::types::ErrorBody;

/// Convert a domain error into its HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(AuthError::EmailAlreadyRegistered) => {
            log::warn!("request rejected: email already registered");
            HttpResponse::Conflict().json(ErrorBody::new(
                409,
                "conflict",
                "Email already registered",
            ))
        }
        DomainError::Auth(AuthError::AuthenticationFailed) => {
            log::warn!("request rejected: authentication failed");
            unauthorized("Invalid credentials")
        }
        DomainError::Token(token_error) => {
            log::warn!("request rejected: {}", token_error);
            unauthorized(&token_error.to_string())
        }
        DomainError::Validation { message } => {
            log::warn!("request rejected: validation failed");
            bad_request(message)
        }
        DomainError::ValidationErr(validation_error) => {
            log::warn!("request rejected: {}", validation_error);
            bad_request(&validation_error.to_string())
        }
        DomainError::NotFound { resource } => {
            log::warn!("request rejected: {} not found", resource);
            HttpResponse::NotFound().json(ErrorBody::new(404, "not_found", "Resource not found"))
        }
        DomainError::Database { message } => {
            // an outage must not read as "wrong password"
            log::error!("store failure: {}", message);
            HttpResponse::ServiceUnavailable().json(ErrorBody::new(
                503,
                "service_unavailable",
                "Service temporarily unavailable",
            ))
        }
        DomainError::Internal { message } => {
            log::error!("internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorBody::new(
                500,
                "internal_error",
                "An internal error occurred",
            ))
        }
    }
}

/// 400 response with the stable error shape
pub fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorBody::new(400, "bad_request", message))
}

fn unauthorized(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorBody::new(401, "unauthorized", message))
}
