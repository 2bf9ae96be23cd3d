//! Report API handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::application::ReportService;
use crate::infrastructure::database::repositories::DefectRepository;
use crate::interfaces::http::common::ApiResult;

/// Report handler state
#[derive(Clone)]
pub struct ReportHandlerState {
    pub reports: Arc<ReportService<DefectRepository>>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExportDefectsParams {
    /// Restrict the export to one project
    pub project_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/reports/defects/csv",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(ExportDefectsParams),
    responses(
        (status = 200, description = "CSV export of defects", body = String, content_type = "text/csv"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn export_defects_csv(
    State(state): State<ReportHandlerState>,
    Query(params): Query<ExportDefectsParams>,
) -> ApiResult<Response> {
    let csv = state.reports.defects_csv(params.project_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=defects.csv",
            ),
        ],
        csv,
    )
        .into_response())
}
