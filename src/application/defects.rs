//! Defect service

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Defect, DefectFilter, DefectPatch, DefectRepositoryInterface, DomainError, DomainResult,
    NewDefect, ProjectRepositoryInterface,
};

pub struct DefectService<D, P>
where
    D: DefectRepositoryInterface,
    P: ProjectRepositoryInterface,
{
    defects: Arc<D>,
    projects: Arc<P>,
}

fn check_priority(priority: Option<i32>) -> DomainResult<()> {
    if let Some(p) = priority {
        if !(1..=5).contains(&p) {
            return Err(DomainError::Validation(
                "Priority must be between 1 (high) and 5 (low)".to_string(),
            ));
        }
    }
    Ok(())
}

impl<D, P> DefectService<D, P>
where
    D: DefectRepositoryInterface,
    P: ProjectRepositoryInterface,
{
    pub fn new(defects: Arc<D>, projects: Arc<P>) -> Self {
        Self { defects, projects }
    }

    /// Create a defect in an existing project. Status starts as `new`,
    /// priority defaults to 3.
    pub async fn create(&self, new: NewDefect) -> DomainResult<Defect> {
        check_priority(new.priority)?;

        if self.projects.find_by_id(&new.project_id).await?.is_none() {
            return Err(DomainError::not_found("Project", "id", &*new.project_id));
        }

        let defect = self.defects.create(new).await?;
        info!(defect_id = %defect.id, project_id = %defect.project_id, "Defect created");
        Ok(defect)
    }

    pub async fn list(&self, filter: DefectFilter) -> DomainResult<Vec<Defect>> {
        self.defects.list(filter).await
    }

    pub async fn get(&self, id: &str) -> DomainResult<Defect> {
        self.defects
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Defect", "id", id))
    }

    /// Apply a partial update. `updated_at` is refreshed even when the patch
    /// repeats the current values.
    pub async fn update(&self, id: &str, patch: DefectPatch) -> DomainResult<Defect> {
        check_priority(patch.priority)?;

        let defect = self
            .defects
            .update(id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Defect", "id", id))?;

        info!(defect_id = %defect.id, status = %defect.status, "Defect updated");
        Ok(defect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{InMemoryDefects, InMemoryProjects};
    use crate::application::ProjectService;
    use crate::domain::{DefectStatus, NewProject};

    fn services() -> (
        DefectService<InMemoryDefects, InMemoryProjects>,
        ProjectService<InMemoryProjects>,
    ) {
        let projects = Arc::new(InMemoryProjects::default());
        let defects = Arc::new(InMemoryDefects::default());
        (
            DefectService::new(defects, projects.clone()),
            ProjectService::new(projects),
        )
    }

    fn new_defect(project_id: &str, title: &str) -> NewDefect {
        NewDefect {
            title: title.to_string(),
            description: None,
            priority: None,
            project_id: project_id.to_string(),
            assigned_to: None,
            created_by: Some("u-eng".to_string()),
        }
    }

    #[tokio::test]
    async fn defect_defaults_to_status_new_and_priority_3() {
        let (defects, projects) = services();
        let project = projects
            .create(NewProject {
                name: "P1".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let defect = defects.create(new_defect(&project.id, "Crack")).await.unwrap();
        assert_eq!(defect.status, DefectStatus::New);
        assert_eq!(defect.priority, 3);
        assert_eq!(defect.created_at, defect.updated_at);
    }

    #[tokio::test]
    async fn defect_requires_an_existing_project() {
        let (defects, _projects) = services();
        let err = defects.create(new_defect("missing", "Crack")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn priority_out_of_range_is_rejected() {
        let (defects, projects) = services();
        let project = projects
            .create(NewProject {
                name: "P1".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let mut invalid = new_defect(&project.id, "Crack");
        invalid.priority = Some(0);
        assert!(matches!(
            defects.create(invalid).await.unwrap_err(),
            DomainError::Validation(_)
        ));

        let created = defects.create(new_defect(&project.id, "Crack")).await.unwrap();
        let err = defects
            .update(
                &created.id,
                DefectPatch {
                    priority: Some(6),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn updating_a_missing_defect_is_not_found() {
        let (defects, _projects) = services();
        let err = defects
            .update("missing", DefectPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    /// The end-to-end scenario: a manager creates "P1", an engineer sees it,
    /// files a defect and moves it to in_progress.
    #[tokio::test]
    async fn project_and_defect_lifecycle() {
        let (defects, projects) = services();

        let p1 = projects
            .create(NewProject {
                name: "P1".to_string(),
                description: Some("North tower".to_string()),
            })
            .await
            .unwrap();

        let listed = projects.list().await.unwrap();
        assert!(listed.iter().any(|p| p.name == "P1"));

        let defect = defects.create(new_defect(&p1.id, "Crack")).await.unwrap();
        assert_eq!(defect.status, DefectStatus::New);

        // Make the updated_at/created_at ordering unambiguous.
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        let updated = defects
            .update(
                &defect.id,
                DefectPatch {
                    status: Some(DefectStatus::InProgress),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let reread = defects.get(&defect.id).await.unwrap();
        assert_eq!(reread.status, DefectStatus::InProgress);
        assert_eq!(reread.updated_at, updated.updated_at);
        assert!(reread.updated_at > reread.created_at);
    }
}
