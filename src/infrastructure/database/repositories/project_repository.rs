use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::{db_err, is_unique_violation};
use crate::domain::{DomainError, DomainResult, NewProject, Project, ProjectRepositoryInterface};
use crate::infrastructure::database::entities::project;

pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn project_model_to_domain(model: project::Model) -> Project {
    Project {
        id: model.id,
        name: model.name,
        description: model.description,
        created_at: model.created_at,
    }
}

#[async_trait]
impl ProjectRepositoryInterface for ProjectRepository {
    async fn create(&self, new: NewProject) -> DomainResult<Project> {
        let model = project::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(new.name),
            description: Set(new.description),
            created_at: Set(Utc::now()),
        };

        let inserted = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("Project name already exists".to_string())
            } else {
                db_err(e)
            }
        })?;

        Ok(project_model_to_domain(inserted))
    }

    async fn list(&self) -> DomainResult<Vec<Project>> {
        let models = project::Entity::find()
            .order_by_asc(project::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(project_model_to_domain).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Project>> {
        let model = project::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(project_model_to_domain))
    }
}
