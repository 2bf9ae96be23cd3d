use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{
    Defect, DefectFilter, DefectPatch, DefectRepositoryInterface, DefectStatus, DomainResult,
    NewDefect,
};
use crate::infrastructure::database::entities::defect;

pub struct DefectRepository {
    db: DatabaseConnection,
}

impl DefectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(status: defect::DefectStatus) -> DefectStatus {
    match status {
        defect::DefectStatus::New => DefectStatus::New,
        defect::DefectStatus::InProgress => DefectStatus::InProgress,
        defect::DefectStatus::Review => DefectStatus::Review,
        defect::DefectStatus::Closed => DefectStatus::Closed,
        defect::DefectStatus::Canceled => DefectStatus::Canceled,
    }
}

fn domain_status_to_entity(status: DefectStatus) -> defect::DefectStatus {
    match status {
        DefectStatus::New => defect::DefectStatus::New,
        DefectStatus::InProgress => defect::DefectStatus::InProgress,
        DefectStatus::Review => defect::DefectStatus::Review,
        DefectStatus::Closed => defect::DefectStatus::Closed,
        DefectStatus::Canceled => defect::DefectStatus::Canceled,
    }
}

fn defect_model_to_domain(model: defect::Model) -> Defect {
    Defect {
        id: model.id,
        title: model.title,
        description: model.description,
        priority: model.priority,
        status: entity_status_to_domain(model.status),
        project_id: model.project_id,
        assigned_to: model.assigned_to,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl DefectRepositoryInterface for DefectRepository {
    async fn create(&self, new: NewDefect) -> DomainResult<Defect> {
        let now = Utc::now();

        let model = defect::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            title: Set(new.title),
            description: Set(new.description),
            priority: Set(new.priority.unwrap_or(3)),
            status: Set(defect::DefectStatus::New),
            project_id: Set(new.project_id),
            assigned_to: Set(new.assigned_to),
            created_by: Set(new.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(defect_model_to_domain(inserted))
    }

    async fn list(&self, filter: DefectFilter) -> DomainResult<Vec<Defect>> {
        let mut query = defect::Entity::find().order_by_asc(defect::Column::CreatedAt);

        if let Some(status) = filter.status {
            query = query.filter(defect::Column::Status.eq(domain_status_to_entity(status)));
        }
        if let Some(project_id) = filter.project_id {
            query = query.filter(defect::Column::ProjectId.eq(project_id));
        }

        let models = query.all(&self.db).await.map_err(db_err)?;
        Ok(models.into_iter().map(defect_model_to_domain).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Defect>> {
        let model = defect::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(defect_model_to_domain))
    }

    async fn update(&self, id: &str, patch: DefectPatch) -> DomainResult<Option<Defect>> {
        let existing = defect::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let merged = patch.apply_to(defect_model_to_domain(existing.clone()), Utc::now());

        let mut active: defect::ActiveModel = existing.into();
        active.title = Set(merged.title.clone());
        active.description = Set(merged.description.clone());
        active.priority = Set(merged.priority);
        active.status = Set(domain_status_to_entity(merged.status));
        active.assigned_to = Set(merged.assigned_to.clone());
        active.updated_at = Set(merged.updated_at);

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(defect_model_to_domain(updated)))
    }
}
