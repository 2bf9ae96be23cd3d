//! Defect DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Defect;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DefectDto {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// 1 = high .. 5 = low
    pub priority: i32,
    pub status: String,
    pub project_id: String,
    pub assigned_to: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Defect> for DefectDto {
    fn from(d: Defect) -> Self {
        Self {
            id: d.id,
            title: d.title,
            description: d.description,
            priority: d.priority,
            status: d.status.as_str().to_string(),
            project_id: d.project_id,
            assigned_to: d.assigned_to,
            created_by: d.created_by,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDefectRequest {
    #[validate(length(min = 1, max = 256, message = "title must be 1-256 characters"))]
    pub title: String,
    pub description: Option<String>,
    /// 1 = high .. 5 = low (default: 3)
    #[validate(range(min = 1, max = 5, message = "priority must be 1-5"))]
    pub priority: Option<i32>,
    pub project_id: String,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDefectRequest {
    #[validate(length(min = 1, max = 256, message = "title must be 1-256 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 5, message = "priority must be 1-5"))]
    pub priority: Option<i32>,
    /// new | in_progress | review | closed | canceled
    pub status: Option<String>,
    pub assigned_to: Option<String>,
}

/// List defects query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListDefectsParams {
    /// Filter by status (new, in_progress, review, closed, canceled)
    pub status: Option<String>,
    /// Filter by project
    pub project_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttachmentResponse {
    pub path: String,
}
