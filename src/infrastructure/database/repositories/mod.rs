//! SeaORM-backed repository implementations

pub mod defect_repository;
pub mod project_repository;
pub mod user_repository;

pub use defect_repository::DefectRepository;
pub use project_repository::ProjectRepository;
pub use user_repository::UserRepository;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

/// SQLite reports unique-index violations as "UNIQUE constraint failed",
/// PostgreSQL as "duplicate key value".
pub(crate) fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.contains("duplicate")
}
