//! MySQL repository implementations

pub mod reset_repository_impl;
pub mod token_repository_impl;
pub mod user_repository_impl;

pub use reset_repository_impl::MySqlResetTokenRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;
