//! Report service — CSV export of defects

use std::sync::Arc;

use crate::domain::{Defect, DefectFilter, DefectRepositoryInterface, DomainResult};

/// Fixed CSV column order; consumers parse by position.
pub const CSV_COLUMNS: [&str; 9] = [
    "id",
    "title",
    "description",
    "status",
    "priority",
    "project_id",
    "assigned_to",
    "created_at",
    "updated_at",
];

pub struct ReportService<D: DefectRepositoryInterface> {
    defects: Arc<D>,
}

impl<D: DefectRepositoryInterface> ReportService<D> {
    pub fn new(defects: Arc<D>) -> Self {
        Self { defects }
    }

    /// Export defects (optionally restricted to one project) as CSV.
    pub async fn defects_csv(&self, project_id: Option<String>) -> DomainResult<String> {
        let defects = self
            .defects
            .list(DefectFilter {
                status: None,
                project_id,
            })
            .await?;

        Ok(render_csv(&defects))
    }
}

pub fn render_csv(defects: &[Defect]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_COLUMNS.join(","));
    out.push_str("\r\n");

    for d in defects {
        let fields = [
            d.id.clone(),
            d.title.clone(),
            d.description.clone().unwrap_or_default(),
            d.status.as_str().to_string(),
            d.priority.to_string(),
            d.project_id.clone(),
            d.assigned_to.clone().unwrap_or_default(),
            d.created_at.to_rfc3339(),
            d.updated_at.to_rfc3339(),
        ];
        let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        out.push_str(&row.join(","));
        out.push_str("\r\n");
    }

    out
}

/// Minimal CSV quoting: only fields containing a delimiter, quote or line
/// break are wrapped, with embedded quotes doubled.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::DefectStatus;

    fn defect(title: &str, description: Option<&str>) -> Defect {
        let now = Utc::now();
        Defect {
            id: "d-1".to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            priority: 3,
            status: DefectStatus::New,
            project_id: "p-1".to_string(),
            assigned_to: None,
            created_by: Some("u-1".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn header_row_matches_the_fixed_column_list() {
        let csv = render_csv(&[]);
        assert_eq!(
            csv.lines().next().unwrap(),
            "id,title,description,status,priority,project_id,assigned_to,created_at,updated_at"
        );
    }

    #[test]
    fn single_defect_renders_one_data_row() {
        let csv = render_csv(&[defect("Crack", None)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);

        let cells: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(cells[1], "Crack");
        assert_eq!(cells[3], "new");
        assert_eq!(cells[4], "3");
        // Absent description and assignee are empty cells, not "None".
        assert_eq!(cells[2], "");
    }

    #[test]
    fn embedded_delimiters_and_quotes_are_escaped() {
        let csv = render_csv(&[defect("Crack, 2nd floor", Some("says \"urgent\""))]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"Crack, 2nd floor\""));
        assert!(row.contains("\"says \"\"urgent\"\"\""));
    }
}
