//! Defect aggregate
//!
//! Contains the Defect entity, the patch/filter DTOs, and the repository
//! interface.

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{DefectFilter, DefectPatch, NewDefect};
pub use model::{Defect, DefectStatus};
pub use repository::DefectRepositoryInterface;
