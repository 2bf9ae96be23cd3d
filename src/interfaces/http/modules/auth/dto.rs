//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Form body of `POST /auth/token`
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
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

#[derive(Debug, Serialize, ToSchema)]
pub struct SeededUsersResponse {
    pub message: String,
    pub users: Vec<String>,
}
