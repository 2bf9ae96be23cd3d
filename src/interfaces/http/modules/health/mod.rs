//! Health and service-info handlers

pub mod handlers;

pub use handlers::*;
