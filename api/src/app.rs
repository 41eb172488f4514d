//! Application factory
//!
//! Builds the Actix application around a prepared [`AppState`]; the binary
//! wires the MySQL implementations, the tests wire the in-memory ones.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use sl_core::repositories::{ResetTokenRepository, TokenRepository, UserRepository};
use sl_shared::types::ErrorBody;

use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{
    change_password::change_password, login::login, logout::logout, me::me, refresh::refresh,
    register::register, reset::{reset_confirm, reset_request}, AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<U, T, P>(
    app_state: web::Data<AppState<U, T, P>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: ResetTokenRepository + 'static,
{
    let jwt_auth = JwtAuth::new(&app_state.config.jwt);

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<U, T, P>))
                    .route("/login", web::post().to(login::<U, T, P>))
                    .route("/refresh", web::post().to(refresh::<U, T, P>))
                    .route("/logout", web::post().to(logout::<U, T, P>))
                    .route("/reset-request", web::post().to(reset_request::<U, T, P>))
                    .route("/reset-confirm", web::post().to(reset_confirm::<U, T, P>))
                    .route(
                        "/change-password",
                        web::post().to(change_password::<U, T, P>),
                    )
                    .service(
                        web::resource("/me")
                            .route(web::get().to(me))
                            .wrap(jwt_auth),
                    ),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "scoutline-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new(404, "not_found", "Route not found"))
}
