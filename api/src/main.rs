use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::{info, warn};

use sl_api::app::create_app;
use sl_api::config::Config;
use sl_api::routes::auth::AppState;
use sl_core::services::auth::{AuthService, AuthServiceConfig};
use sl_core::services::token::{TokenService, TokenServiceConfig};
use sl_infra::{
    create_pool, MySqlResetTokenRepository, MySqlTokenRepository, MySqlUserRepository,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting ScoutLine API server");

    // Load configuration once; services receive it by reference from here on
    let config = Arc::new(Config::from_env());
    if config.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the default development secret");
    }

    // Database connection pool
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    // Repositories and services
    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let reset_repository = Arc::new(MySqlResetTokenRepository::new(pool.clone()));
    let token_service = Arc::new(TokenService::new(
        MySqlTokenRepository::new(pool.clone()),
        TokenServiceConfig::from(&config.jwt),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_service,
        reset_repository,
        AuthServiceConfig::from(&config.reset_token),
    ));

    let app_state = web::Data::new(AppState {
        auth_service,
        config: config.clone(),
    });

    let bind_address = config.server.bind_address();
    info!("Server listening on {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
