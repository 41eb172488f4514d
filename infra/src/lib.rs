//! # ScoutLine Infrastructure
//!
//! Concrete implementations of the core repository traits backed by MySQL,
//! plus connection-pool construction.

pub mod database;

pub use database::connection::create_pool;
pub use database::mysql::{
    MySqlResetTokenRepository, MySqlTokenRepository, MySqlUserRepository,
};
