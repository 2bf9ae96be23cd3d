//! Project API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{CreateProjectRequest, ProjectDto};
use crate::application::ProjectService;
use crate::auth::policy::{authorize, Action};
use crate::domain::NewProject;
use crate::infrastructure::database::repositories::ProjectRepository;
use crate::interfaces::http::common::validated_json::ValidatedJsonRejection;
use crate::interfaces::http::common::{ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Project handler state
#[derive(Clone)]
pub struct ProjectHandlerState {
    pub projects: Arc<ProjectService<ProjectRepository>>,
}

#[utoipa::path(
    post,
    path = "/projects",
    tag = "Projects",
    security(("bearer_auth" = [])),
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectDto),
        (status = 403, description = "Insufficient role"),
        (status = 409, description = "Project name already exists")
    )
)]
pub async fn create_project(
    State(state): State<ProjectHandlerState>,
    Extension(current): Extension<AuthenticatedUser>,
    payload: Result<ValidatedJson<CreateProjectRequest>, ValidatedJsonRejection>,
) -> ApiResult<(StatusCode, Json<ProjectDto>)> {
    // The role check comes first: a denied caller gets 403 regardless of
    // payload validity.
    authorize(current.role(), Action::CreateProject)?;
    let ValidatedJson(request) = payload?;

    let project = state
        .projects
        .create(NewProject {
            name: request.name,
            description: request.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProjectDto::from(project))))
}

#[utoipa::path(
    get,
    path = "/projects",
    tag = "Projects",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Project list", body = [ProjectDto]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_projects(
    State(state): State<ProjectHandlerState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<ProjectDto>>> {
    authorize(current.role(), Action::ViewProjects)?;

    let projects = state.projects.list().await?;
    Ok(Json(projects.into_iter().map(ProjectDto::from).collect()))
}
