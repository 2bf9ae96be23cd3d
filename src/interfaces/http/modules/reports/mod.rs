//! Report module — CSV export

pub mod handlers;

pub use handlers::*;
