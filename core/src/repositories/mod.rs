//! Repository interfaces consumed by the authentication services.
//!
//! Concrete database implementations live in the infrastructure crate; the
//! in-memory mocks here back the unit and API tests.

pub mod reset;
pub mod token;
pub mod user;

pub use reset::{MockResetTokenRepository, ResetTokenRepository};
pub use token::{MockTokenRepository, TokenRepository};
pub use user::{MockUserRepository, UserRepository};
