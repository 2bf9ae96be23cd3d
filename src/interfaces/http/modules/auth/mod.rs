//! Authentication module — login, registration, dev-account seeding

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
