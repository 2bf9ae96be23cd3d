use chrono::{DateTime, Utc};

use super::model::{Defect, DefectStatus};

#[derive(Debug, Clone)]
pub struct NewDefect {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to 3 (medium) when not given
    pub priority: Option<i32>,
    pub project_id: String,
    pub assigned_to: Option<String>,
    pub created_by: Option<String>,
}

/// Mutable defect fields. Fields left as `None` are unchanged.
#[derive(Debug, Clone, Default)]
pub struct DefectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i32>,
    pub status: Option<DefectStatus>,
    pub assigned_to: Option<String>,
}

impl DefectPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.assigned_to.is_none()
    }

    /// Merge the patch into an existing defect, returning the updated record.
    /// `updated_at` is refreshed on every application.
    pub fn apply_to(self, mut defect: Defect, now: DateTime<Utc>) -> Defect {
        if let Some(title) = self.title {
            defect.title = title;
        }
        if let Some(description) = self.description {
            defect.description = Some(description);
        }
        if let Some(priority) = self.priority {
            defect.priority = priority;
        }
        if let Some(status) = self.status {
            defect.status = status;
        }
        if let Some(assigned_to) = self.assigned_to {
            defect.assigned_to = Some(assigned_to);
        }
        defect.updated_at = now;
        defect
    }
}

/// Filters for listing defects
#[derive(Debug, Clone, Default)]
pub struct DefectFilter {
    pub status: Option<DefectStatus>,
    pub project_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn sample_defect() -> Defect {
        let created = Utc::now() - Duration::minutes(10);
        Defect {
            id: "d-1".to_string(),
            title: "Crack in wall".to_string(),
            description: Some("Hairline crack".to_string()),
            priority: 3,
            status: DefectStatus::New,
            project_id: "p-1".to_string(),
            assigned_to: None,
            created_by: Some("u-1".to_string()),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn patch_touches_only_provided_fields() {
        let defect = sample_defect();
        let now = Utc::now();

        let patch = DefectPatch {
            status: Some(DefectStatus::InProgress),
            assigned_to: Some("u-2".to_string()),
            ..Default::default()
        };
        let updated = patch.apply_to(defect.clone(), now);

        assert_eq!(updated.status, DefectStatus::InProgress);
        assert_eq!(updated.assigned_to.as_deref(), Some("u-2"));
        assert_eq!(updated.title, defect.title);
        assert_eq!(updated.description, defect.description);
        assert_eq!(updated.priority, defect.priority);
        assert_eq!(updated.created_at, defect.created_at);
        assert_eq!(updated.updated_at, now);
        assert!(updated.updated_at > updated.created_at);
    }

    #[test]
    fn empty_patch_still_refreshes_updated_at() {
        let defect = sample_defect();
        let now = Utc::now();
        let updated = DefectPatch::default().apply_to(defect.clone(), now);
        assert_eq!(updated.status, defect.status);
        assert_eq!(updated.updated_at, now);
    }
}
