//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Form, Json};

use super::dto::{LoginForm, RegisterRequest, SeededUsersResponse, TokenResponse};
use crate::application::{IdentityService, RegisterUser};
use crate::domain::{DomainError, UserRole};
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{ApiResult, ValidatedJson};
use crate::interfaces::http::modules::users::dto::UserDto;

/// Auth handler state — concrete over `UserRepository` for Axum compatibility.
#[derive(Clone)]
pub struct AuthHandlerState {
    pub identity: Arc<IdentityService<UserRepository>>,
    /// Mirrors `security.allow_legacy_test_hashes`; the seeding endpoint is
    /// hidden when the legacy shim is off.
    pub allow_legacy_seeding: bool,
}

#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "Authentication",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Successful login", body = TokenResponse),
        (status = 401, description = "Incorrect username or password")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let auth = state.identity.authenticate(&form.username, &form.password).await?;

    Ok(Json(TokenResponse {
        access_token: auth.token,
        token_type: auth.token_type,
    }))
}

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 409, description = "Username already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
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
    post,
    path = "/auth/create-test-users",
    tag = "Authentication",
    responses(
        (status = 200, description = "Seeded dev accounts", body = SeededUsersResponse),
        (status = 404, description = "Legacy accounts disabled")
    )
)]
pub async fn create_test_users(
    State(state): State<AuthHandlerState>,
) -> ApiResult<Json<SeededUsersResponse>> {
    if !state.allow_legacy_seeding {
        return Err(DomainError::not_found("Route", "path", "/auth/create-test-users").into());
    }

    let users = state.identity.seed_test_users().await?;
    Ok(Json(SeededUsersResponse {
        message: format!("Created {} test users", users.len()),
        users,
    }))
}
