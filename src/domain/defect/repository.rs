use async_trait::async_trait;

use super::{Defect, DefectFilter, DefectPatch, NewDefect};
use crate::domain::DomainResult;

#[async_trait]
pub trait DefectRepositoryInterface: Send + Sync {
    /// Insert a new defect with status `new` and default priority 3.
    async fn create(&self, new: NewDefect) -> DomainResult<Defect>;

    async fn list(&self, filter: DefectFilter) -> DomainResult<Vec<Defect>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Defect>>;

    /// Apply a patch to an existing defect. Returns `None` when the defect
    /// does not exist.
    async fn update(&self, id: &str, patch: DefectPatch) -> DomainResult<Option<Defect>>;
}
