//! Response helpers shared by the route handlers

pub mod error;

pub use error::{bad_request, handle_domain_error};
