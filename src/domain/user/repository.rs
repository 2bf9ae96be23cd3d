use async_trait::async_trait;

use super::{NewUser, ProfilePatch, User, UserRole};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Insert a new user. Duplicate usernames must surface as
    /// `DomainError::Conflict`, backed by a storage-level uniqueness
    /// constraint so concurrent registrations cannot both succeed.
    async fn create(&self, new: NewUser) -> DomainResult<User>;

    async fn list(&self) -> DomainResult<Vec<User>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn count(&self) -> DomainResult<u64>;

    async fn update_profile(&self, id: &str, patch: ProfilePatch) -> DomainResult<Option<User>>;
    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<User>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
