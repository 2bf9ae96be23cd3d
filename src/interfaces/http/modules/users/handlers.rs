//! User management API handlers
//!
//! Every handler consults the role capability table before delegating to the
//! identity service, which applies the self/admin-protection rules.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{ChangeRoleRequest, CreateUserRequest, UpdateProfileRequest, UserDto};
use crate::application::{IdentityService, RegisterUser};
use crate::auth::policy::{authorize, Action};
use crate::domain::{DomainError, ProfilePatch, UserRole};
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::validated_json::ValidatedJsonRejection;
use crate::interfaces::http::common::{ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// User handler state — concrete over `UserRepository` for Axum compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub identity: Arc<IdentityService<UserRepository>>,
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User list", body = [UserDto]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient role")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<UserDto>>> {
    authorize(current.role(), Action::ListUsers)?;

    let users = state.identity.list_users().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 403, description = "Insufficient role"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    Extension(current): Extension<AuthenticatedUser>,
    payload: Result<ValidatedJson<CreateUserRequest>, ValidatedJsonRejection>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
    authorize(current.role(), Action::CreateUser)?;
    let ValidatedJson(request) = payload?;

    let role = match request.role.as_deref() {
        Some(name) => Some(
            UserRole::parse(name)
                .ok_or_else(|| DomainError::Validation(format!("Unknown role '{}'", name)))?,
        ),
        None => None,
    };

    let user = state
        .identity
        .register(RegisterUser {
            username: request.username,
            password: request.password,
            role,
            full_name: request.full_name,
            email: request.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_me(
    Extension(current): Extension<AuthenticatedUser>,
) -> ApiResult<Json<UserDto>> {
    authorize(current.role(), Action::ViewOwnProfile)?;
    Ok(Json(UserDto::from(current.user)))
}

#[utoipa::path(
    put,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_me(
    State(state): State<UserHandlerState>,
    Extension(current): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserDto>> {
    authorize(current.role(), Action::EditOwnProfile)?;

    let user = state
        .identity
        .update_profile(
            current.id(),
            ProfilePatch {
                full_name: request.full_name,
                email: request.email,
            },
        )
        .await?;

    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    put,
    path = "/users/{id}/role",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = ChangeRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = UserDto),
        (status = 403, description = "Insufficient role or self-protection"),
        (status = 404, description = "User not found")
    )
)]
pub async fn change_role(
    State(state): State<UserHandlerState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    payload: Result<ValidatedJson<ChangeRoleRequest>, ValidatedJsonRejection>,
) -> ApiResult<Json<UserDto>> {
    authorize(current.role(), Action::ChangeUserRole)?;
    let ValidatedJson(request) = payload?;

    let role = UserRole::parse(&request.role)
        .ok_or_else(|| DomainError::Validation(format!("Unknown role '{}'", request.role)))?;

    let user = state.identity.change_role(&current.user, &id, role).await?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Insufficient role, self-protection or admin-protection"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    authorize(current.role(), Action::DeleteUser)?;

    state.identity.delete_user(&current.user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
