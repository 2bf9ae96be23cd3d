//! Authentication middleware for Axum
//!
//! Verifies the bearer token statelessly, then resolves its subject to a
//! stored user. Both a missing/invalid/expired token and an unresolvable
//! subject produce the same generic 401; role failures are 403s raised later
//! by the handlers.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::token::{verify_token, JwtConfig};
use crate::domain::{User, UserRepositoryInterface, UserRole};
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::ApiError;

/// Authentication state containing JWT config and the user store
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub users: Arc<UserRepository>,
}

/// Authenticated identity attached to request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn id(&self) -> &str {
        &self.user.id
    }

    pub fn role(&self) -> UserRole {
        self.user.role
    }
}

/// Extract token from Authorization header
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Bearer-token authentication middleware — requires a valid token
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return unauthorized();
    };

    let Some(token) = extract_token(&auth_header) else {
        return unauthorized();
    };

    let Some(username) = verify_token(token, &auth_state.jwt_config) else {
        return unauthorized();
    };

    // The token is stateless; its subject must still resolve to a stored user.
    let user = match auth_state.users.find_by_username(&username).await {
        Ok(Some(user)) => user,
        Ok(None) => return unauthorized(),
        Err(e) => return ApiError(e).into_response(),
    };

    request.extensions_mut().insert(AuthenticatedUser { user });
    next.run(request).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Invalid authentication credentials" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_token("Basic dXNlcg=="), None);
        assert_eq!(extract_token("abc.def.ghi"), None);
    }
}
