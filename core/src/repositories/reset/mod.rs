pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub mod mock;

pub use mock::MockResetTokenRepository;
pub use r#trait::ResetTokenRepository;

#[cfg(test)]
mod tests;
