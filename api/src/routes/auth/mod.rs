//! Authentication route handlers
//!
//! This module contains all authentication endpoints:
//! - Registration and login
//! - Token refresh and logout
//! - Password reset (request and confirm) and password change
//! - The authenticated identity endpoint

pub mod change_password;
pub mod cookie;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
pub mod reset;

use std::sync::Arc;

use sl_core::repositories::{ResetTokenRepository, TokenRepository, UserRepository};
use sl_core::services::auth::AuthService;

use crate::config::Config;

/// Shared application state handed to every handler
pub struct AppState<U, T, P>
where
    U: UserRepository,
    T: TokenRepository,
    P: ResetTokenRepository,
{
    /// The session orchestrator
    pub auth_service: Arc<AuthService<U, T, P>>,
    /// Process configuration
    pub config: Arc<Config>,
}
