//! User management module — admin/manager endpoints plus own-profile access

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
