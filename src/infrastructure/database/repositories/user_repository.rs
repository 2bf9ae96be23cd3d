use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, is_unique_violation};
use crate::domain::{
    DomainError, DomainResult, NewUser, ProfilePatch, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Manager => UserRole::Manager,
        user::UserRole::Engineer => UserRole::Engineer,
        user::UserRole::Observer => UserRole::Observer,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Manager => user::UserRole::Manager,
        UserRole::Engineer => user::UserRole::Engineer,
        UserRole::Observer => user::UserRole::Observer,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        full_name: model.full_name,
        email: model.email,
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create(&self, new: NewUser) -> DomainResult<User> {
        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        let model = user::ActiveModel {
            id: Set(id),
            username: Set(new.username),
            password_hash: Set(new.password_hash),
            role: Set(domain_role_to_entity(new.role)),
            full_name: Set(new.full_name),
            email: Set(new.email),
            is_active: Set(true),
            created_at: Set(now),
        };

        let inserted = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("Username already exists".to_string())
            } else {
                db_err(e)
            }
        })?;

        Ok(user_model_to_domain(inserted))
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn update_profile(&self, id: &str, patch: ProfilePatch) -> DomainResult<Option<User>> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let merged = patch.apply_to(user_model_to_domain(existing.clone()));

        let mut active: user::ActiveModel = existing.into();
        active.full_name = Set(merged.full_name);
        active.email = Set(merged.email);

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(user_model_to_domain(updated)))
    }

    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<User> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;

        let mut active: user::ActiveModel = existing.into();
        active.role = Set(domain_role_to_entity(role));

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(user_model_to_domain(updated))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", "id", id));
        }

        Ok(())
    }
}
