//! Defect module — CRUD plus attachment upload

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
