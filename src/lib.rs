//! # Construction Defects System
//!
//! Multi-tenant CRUD backend for tracking construction-site defects across
//! projects, with four user roles and token-based authentication.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, DTOs and repository interfaces
//! - **application**: Business logic and use-case services
//! - **infrastructure**: External concerns (database, attachment storage)
//! - **auth**: Password hashing, access tokens, role policy
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
