//! Bearer-token guard for protected endpoints.
//!
//! Extracts the JWT from the Authorization header, verifies signature,
//! expiry, issuer and audience against process-wide configuration, and
//! injects the resolved identity into the request. Verification is pure per
//! request; the guard never consults the registries. A refresh token is
//! rejected here even when its signature is valid.

use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use sl_core::domain::entities::token::{Claims, TokenType};
use sl_core::domain::entities::user::UserRole;
use sl_shared::config::JwtConfig;
use sl_shared::types::ErrorBody;

/// Identity resolved from a verified access token
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from the claims
    pub user_id: Uuid,
    /// Login email of the subject
    pub email: String,
    /// Role for downstream authorization
    pub role: UserRole,
}

impl AuthContext {
    /// Build the context from verified access-token claims
    fn from_claims(claims: Claims) -> Option<Self> {
        let user_id = claims.user_id().ok()?;

        Some(Self {
            user_id,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuth {
    /// Create the guard from the process-wide JWT configuration
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            decoding_key: self.decoding_key.clone(),
            validation: self.validation.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let decoding_key = self.decoding_key.clone();
        let validation = self.validation.clone();

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => return Ok(reject(req, "Missing or invalid Authorization header")),
            };

            let token_data = match decode::<Claims>(&token, &decoding_key, &validation) {
                Ok(data) => data,
                Err(_) => return Ok(reject(req, "Invalid or expired access token")),
            };

            // access and refresh tokens are not interchangeable
            if token_data.claims.token_type == TokenType::Refresh {
                return Ok(reject(req, "Refresh token presented as access token"));
            }

            let auth_context = match AuthContext::from_claims(token_data.claims) {
                Some(context) => context,
                None => return Ok(reject(req, "Invalid access token")),
            };
            req.extensions_mut().insert(auth_context);

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Short-circuit with the stable 401 body
fn reject<B>(req: ServiceRequest, message: &str) -> ServiceResponse<EitherBody<B>> {
    let response = HttpResponse::Unauthorized().json(ErrorBody::new(401, "unauthorized", message));
    req.into_response(response).map_into_right_body()
}

/// Extracts the Bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Rejection used by the extractors, rendered with the stable error body
#[derive(Debug)]
pub struct AuthRequired;

impl std::fmt::Display for AuthRequired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Authentication required")
    }
}

impl ResponseError for AuthRequired {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized().json(ErrorBody::new(
            401,
            "unauthorized",
            "Authentication required",
        ))
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| AuthRequired.into());

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(
            extract_bearer_token(&req),
            Some("test_token_123".to_string())
        );

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}
