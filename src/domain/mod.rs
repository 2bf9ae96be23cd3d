//! Core business entities, DTOs and repository interfaces

pub mod defect;
pub mod error;
pub mod project;
pub mod user;

pub use defect::{
    Defect, DefectFilter, DefectPatch, DefectRepositoryInterface, DefectStatus, NewDefect,
};
pub use error::{DomainError, DomainResult};
pub use project::{NewProject, Project, ProjectRepositoryInterface};
pub use user::{NewUser, ProfilePatch, User, UserRepositoryInterface, UserRole};
