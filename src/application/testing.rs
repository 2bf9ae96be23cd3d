//! In-memory repository fakes for service tests
//!
//! They mirror the storage-level behavior the services rely on: uniqueness
//! constraints surface as `Conflict`, defects start as `new`, and patches go
//! through the same pure merge as the SeaORM repositories.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    Defect, DefectFilter, DefectPatch, DefectRepositoryInterface, DomainError, DomainResult,
    NewDefect, NewProject, NewUser, ProfilePatch, Project, ProjectRepositoryInterface, User,
    UserRepositoryInterface, UserRole,
};

// ── Users ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn deactivate(&self, username: &str) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(user) = rows.iter_mut().find(|u| u.username == username) {
            user.is_active = false;
        }
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUsers {
    async fn create(&self, new: NewUser) -> DomainResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.username == new.username) {
            return Err(DomainError::Conflict("Username already exists".to_string()));
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: new.username,
            password_hash: new.password_hash,
            role: new.role,
            full_name: new.full_name,
            email: new.email,
            is_active: true,
            created_at: Utc::now(),
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn update_profile(&self, id: &str, patch: ProfilePatch) -> DomainResult<Option<User>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(user) = rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        *user = patch.apply_to(user.clone());
        Ok(Some(user.clone()))
    }

    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;
        user.role = role;
        Ok(user.clone())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(DomainError::not_found("User", "id", id));
        }
        Ok(())
    }
}

// ── Projects ────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryProjects {
    rows: Mutex<Vec<Project>>,
}

#[async_trait]
impl ProjectRepositoryInterface for InMemoryProjects {
    async fn create(&self, new: NewProject) -> DomainResult<Project> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|p| p.name == new.name) {
            return Err(DomainError::Conflict(
                "Project name already exists".to_string(),
            ));
        }

        let project = Project {
            id: uuid::Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            created_at: Utc::now(),
        };
        rows.push(project.clone());
        Ok(project)
    }

    async fn list(&self) -> DomainResult<Vec<Project>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Project>> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }
}

// ── Defects ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryDefects {
    rows: Mutex<Vec<Defect>>,
}

#[async_trait]
impl DefectRepositoryInterface for InMemoryDefects {
    async fn create(&self, new: NewDefect) -> DomainResult<Defect> {
        let now = Utc::now();
        let defect = Defect {
            id: uuid::Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            priority: new.priority.unwrap_or(3),
            status: Default::default(),
            project_id: new.project_id,
            assigned_to: new.assigned_to,
            created_by: new.created_by,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(defect.clone());
        Ok(defect)
    }

    async fn list(&self, filter: DefectFilter) -> DomainResult<Vec<Defect>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|d| filter.status.map_or(true, |s| d.status == s))
            .filter(|d| {
                filter
                    .project_id
                    .as_ref()
                    .map_or(true, |p| &d.project_id == p)
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Defect>> {
        Ok(self.rows.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn update(&self, id: &str, patch: DefectPatch) -> DomainResult<Option<Defect>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(defect) = rows.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        *defect = patch.apply_to(defect.clone(), Utc::now());
        Ok(Some(defect.clone()))
    }
}
