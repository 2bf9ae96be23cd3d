use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Defect status
///
/// The nominal flow is new → in_progress → review → closed/canceled, but
/// transition ordering is not enforced: any authorized actor may set any of
/// the five values directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectStatus {
    New,
    InProgress,
    Review,
    Closed,
    Canceled,
}

impl DefectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefectStatus::New => "new",
            DefectStatus::InProgress => "in_progress",
            DefectStatus::Review => "review",
            DefectStatus::Closed => "closed",
            DefectStatus::Canceled => "canceled",
        }
    }

    pub fn parse(s: &str) -> Option<DefectStatus> {
        match s {
            "new" => Some(DefectStatus::New),
            "in_progress" => Some(DefectStatus::InProgress),
            "review" => Some(DefectStatus::Review),
            "closed" => Some(DefectStatus::Closed),
            "canceled" => Some(DefectStatus::Canceled),
            _ => None,
        }
    }
}

impl Default for DefectStatus {
    fn default() -> Self {
        Self::New
    }
}

impl std::fmt::Display for DefectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defect model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defect {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// 1 = high .. 5 = low
    pub priority: i32,
    pub status: DefectStatus,
    pub project_id: String,
    pub assigned_to: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_rejects_unknown_values() {
        assert_eq!(DefectStatus::parse("in_progress"), Some(DefectStatus::InProgress));
        assert_eq!(DefectStatus::parse("reopened"), None);
        assert_eq!(DefectStatus::parse("In_Progress"), None);
    }
}
