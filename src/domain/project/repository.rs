use async_trait::async_trait;

use super::{NewProject, Project};
use crate::domain::DomainResult;

#[async_trait]
pub trait ProjectRepositoryInterface: Send + Sync {
    /// Insert a new project. Duplicate names surface as `DomainError::Conflict`.
    async fn create(&self, new: NewProject) -> DomainResult<Project>;

    async fn list(&self) -> DomainResult<Vec<Project>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Project>>;
}
