//! External concerns: database access and attachment storage

pub mod database;
pub mod uploads;

pub use database::{init_database, DatabaseConfig};
