//! Request and response DTOs

pub mod auth;

pub use auth::{
    AuthResponse, ChangePasswordRequest, LoginRequest, LogoutRequest, RefreshRequest,
    RegisterRequest, ResetConfirmRequest, ResetRequest, UserView,
};
