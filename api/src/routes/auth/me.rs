//! Handler for GET /api/v1/auth/me

use actix_web::HttpResponse;

use crate::middleware::auth::AuthContext;

/// Returns the identity resolved by the access guard
///
/// Runs behind `JwtAuth`; reaching this handler means the bearer token
/// verified as an access token.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "id": auth.user_id,
        "email": auth.email,
        "role": auth.role,
    }))
}
