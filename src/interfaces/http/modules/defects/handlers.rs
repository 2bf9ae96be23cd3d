//! Defect API handlers

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    AttachmentResponse, CreateDefectRequest, DefectDto, ListDefectsParams, UpdateDefectRequest,
};
use crate::application::DefectService;
use crate::auth::policy::{authorize, Action};
use crate::domain::{DefectFilter, DefectPatch, DefectStatus, DomainError, NewDefect};
use crate::infrastructure::database::repositories::{DefectRepository, ProjectRepository};
use crate::infrastructure::uploads::save_attachment;
use crate::interfaces::http::common::validated_json::ValidatedJsonRejection;
use crate::interfaces::http::common::{ApiError, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Defect handler state
#[derive(Clone)]
pub struct DefectHandlerState {
    pub defects: Arc<DefectService<DefectRepository, ProjectRepository>>,
    pub upload_dir: PathBuf,
}

fn parse_status(s: &str) -> ApiResult<DefectStatus> {
    DefectStatus::parse(s)
        .ok_or_else(|| DomainError::Validation(format!("Invalid status '{}'", s)).into())
}

#[utoipa::path(
    post,
    path = "/defects",
    tag = "Defects",
    security(("bearer_auth" = [])),
    request_body = CreateDefectRequest,
    responses(
        (status = 201, description = "Defect created", body = DefectDto),
        (status = 404, description = "Project not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_defect(
    State(state): State<DefectHandlerState>,
    Extension(current): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateDefectRequest>,
) -> ApiResult<(StatusCode, Json<DefectDto>)> {
    authorize(current.role(), Action::CreateDefect)?;

    let defect = state
        .defects
        .create(NewDefect {
            title: request.title,
            description: request.description,
            priority: request.priority,
            project_id: request.project_id,
            assigned_to: request.assigned_to,
            created_by: Some(current.id().to_string()),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DefectDto::from(defect))))
}

#[utoipa::path(
    get,
    path = "/defects",
    tag = "Defects",
    security(("bearer_auth" = [])),
    params(ListDefectsParams),
    responses(
        (status = 200, description = "Defect list", body = [DefectDto]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_defects(
    State(state): State<DefectHandlerState>,
    Query(params): Query<ListDefectsParams>,
) -> ApiResult<Json<Vec<DefectDto>>> {
    let status = params.status.as_deref().map(parse_status).transpose()?;

    let defects = state
        .defects
        .list(DefectFilter {
            status,
            project_id: params.project_id,
        })
        .await?;

    Ok(Json(defects.into_iter().map(DefectDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/defects/{id}",
    tag = "Defects",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Defect ID")),
    responses(
        (status = 200, description = "Defect details", body = DefectDto),
        (status = 404, description = "Defect not found")
    )
)]
pub async fn get_defect(
    State(state): State<DefectHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DefectDto>> {
    let defect = state.defects.get(&id).await?;
    Ok(Json(DefectDto::from(defect)))
}

#[utoipa::path(
    put,
    path = "/defects/{id}",
    tag = "Defects",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Defect ID")),
    request_body = UpdateDefectRequest,
    responses(
        (status = 200, description = "Defect updated", body = DefectDto),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "Defect not found"),
        (status = 422, description = "Invalid status")
    )
)]
pub async fn update_defect(
    State(state): State<DefectHandlerState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    payload: Result<ValidatedJson<UpdateDefectRequest>, ValidatedJsonRejection>,
) -> ApiResult<Json<DefectDto>> {
    authorize(current.role(), Action::UpdateDefect)?;
    let ValidatedJson(request) = payload?;

    let status = request.status.as_deref().map(parse_status).transpose()?;

    let defect = state
        .defects
        .update(
            &id,
            DefectPatch {
                title: request.title,
                description: request.description,
                priority: request.priority,
                status,
                assigned_to: request.assigned_to,
            },
        )
        .await?;

    Ok(Json(DefectDto::from(defect)))
}

#[utoipa::path(
    post,
    path = "/defects/{id}/attachments",
    tag = "Defects",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Defect ID")),
    responses(
        (status = 200, description = "Attachment stored", body = AttachmentResponse),
        (status = 404, description = "Defect not found"),
        (status = 422, description = "Missing file field")
    )
)]
pub async fn upload_attachment(
    State(state): State<DefectHandlerState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Json<AttachmentResponse>> {
    // The attachment belongs to an existing defect.
    state.defects.get(&id).await?;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("attachment").to_string();
            let data = field.bytes().await.map_err(bad_multipart)?;

            let path = save_attachment(&state.upload_dir, &filename, &data)
                .await
                .map_err(|e| {
                    ApiError(DomainError::Database(format!(
                        "Failed to store attachment: {}",
                        e
                    )))
                })?;

            return Ok(Json(AttachmentResponse {
                path: path.to_string_lossy().into_owned(),
            }));
        }
    }

    Err(DomainError::Validation("Missing 'file' field".to_string()).into())
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError(DomainError::Validation(format!(
        "Invalid multipart payload: {}",
        e
    )))
}
