//! Project service

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainResult, NewProject, Project, ProjectRepositoryInterface};

pub struct ProjectService<P: ProjectRepositoryInterface> {
    repo: Arc<P>,
}

impl<P: ProjectRepositoryInterface> ProjectService<P> {
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, new: NewProject) -> DomainResult<Project> {
        let project = self.repo.create(new).await?;
        info!(project_id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    pub async fn list(&self) -> DomainResult<Vec<Project>> {
        self.repo.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryProjects;
    use crate::domain::DomainError;

    #[tokio::test]
    async fn duplicate_project_name_conflicts() {
        let repo = Arc::new(InMemoryProjects::default());
        let svc = ProjectService::new(repo);

        svc.create(NewProject {
            name: "P1".to_string(),
            description: None,
        })
        .await
        .unwrap();

        let err = svc
            .create(NewProject {
                name: "P1".to_string(),
                description: Some("again".to_string()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }
}
