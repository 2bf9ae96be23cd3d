//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::User;

/// User API representation (the password hash is never echoed)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub role: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            role: u.role.as_str().to_string(),
            full_name: u.full_name,
            email: u.email,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}

/// Create user request (admin panel)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 128, message = "username must be 3-128 characters"))]
    pub username: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6-128 characters"))]
    pub password: String,
    /// admin | manager | engineer | observer (default: observer)
    pub role: Option<String>,
    pub full_name: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
}

/// Own-profile update; only these two fields are mutable
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 256))]
    pub full_name: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeRoleRequest {
    /// admin | manager | engineer | observer
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
}
