//! HTTP REST API interfaces
//!
//! - `common`: error mapping and validated JSON extraction
//! - `middleware`: bearer-token authentication middleware
//! - `modules`: request handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
