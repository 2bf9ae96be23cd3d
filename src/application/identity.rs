//! Identity service — authentication and user management
//!
//! All user-related business logic lives here, including the self-protection
//! and admin-protection rules. HTTP handlers are thin wrappers that delegate
//! to this service after consulting the role capability table.

use std::sync::Arc;

use tracing::info;

use crate::auth::password::{hash_password, legacy_hash, password_matches};
use crate::auth::token::{issue_token, JwtConfig};
use crate::domain::{
    DomainError, DomainResult, NewUser, ProfilePatch, User, UserRepositoryInterface, UserRole,
};

/// The one credential-failure signal exposed at the API boundary. A missing
/// username and a wrong password are intentionally indistinguishable.
const BAD_CREDENTIALS: &str = "Incorrect username or password";

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub user: User,
}

/// Registration payload (plaintext password; hashed inside the service)
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    pub role: Option<UserRole>,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

pub struct IdentityService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
    allow_legacy_hashes: bool,
}

impl<R: UserRepositoryInterface> IdentityService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig, allow_legacy_hashes: bool) -> Self {
        Self {
            repo,
            jwt_config,
            allow_legacy_hashes,
        }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username + password and mint an access token.
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repo.find_by_username(username).await? else {
            return Err(DomainError::Unauthorized(BAD_CREDENTIALS.to_string()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized(BAD_CREDENTIALS.to_string()));
        }

        if !password_matches(password, &user.password_hash, self.allow_legacy_hashes) {
            return Err(DomainError::Unauthorized(BAD_CREDENTIALS.to_string()));
        }

        let token = issue_token(&user.username, &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        info!(username = %user.username, "User authenticated");

        Ok(AuthResult {
            token,
            token_type: "bearer".to_string(),
            user,
        })
    }

    // ── Registration / user creation ────────────────────────────

    /// Register a new user (default role: observer). Only the bcrypt hash is
    /// stored; the duplicate-username race is decided by the storage-level
    /// uniqueness constraint, the pre-check just gives a friendlier error.
    pub async fn register(&self, req: RegisterUser) -> DomainResult<User> {
        if self.repo.find_by_username(&req.username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".to_string()));
        }

        let password_hash = hash_password(&req.password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repo
            .create(NewUser {
                username: req.username,
                password_hash,
                role: req.role.unwrap_or_default(),
                full_name: req.full_name,
                email: req.email,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "New user registered");
        Ok(user)
    }

    /// Seed the legacy development accounts (stored in the deprecated
    /// `test_hash_` format) when they do not exist yet.
    pub async fn seed_test_users(&self) -> DomainResult<Vec<String>> {
        let seeds = [
            ("manager", "admin123", UserRole::Manager, "Project Manager"),
            ("engineer", "user123", UserRole::Engineer, "Site Engineer"),
            ("observer", "view123", UserRole::Observer, "Site Observer"),
        ];

        let mut created = Vec::new();
        for (username, password, role, full_name) in seeds {
            if self.repo.find_by_username(username).await?.is_none() {
                self.repo
                    .create(NewUser {
                        username: username.to_string(),
                        password_hash: legacy_hash(password),
                        role,
                        full_name: Some(full_name.to_string()),
                        email: Some(format!("{}@test.com", username)),
                    })
                    .await?;
                created.push(username.to_string());
            }
        }

        if !created.is_empty() {
            info!(count = created.len(), "Seeded test users");
        }
        Ok(created)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.repo.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        self.repo.find_by_username(username).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Update the caller's own profile (full name, email).
    pub async fn update_profile(&self, user_id: &str, patch: ProfilePatch) -> DomainResult<User> {
        self.repo
            .update_profile(user_id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))
    }

    /// Change another user's role. Self-protection applies before any
    /// capability check: nobody may change their own role.
    pub async fn change_role(
        &self,
        actor: &User,
        target_id: &str,
        new_role: UserRole,
    ) -> DomainResult<User> {
        if actor.id == target_id {
            return Err(DomainError::Forbidden(
                "Users cannot change their own role".to_string(),
            ));
        }

        let user = self.repo.set_role(target_id, new_role).await?;
        info!(actor = %actor.username, target = %user.username, role = %user.role, "User role changed");
        Ok(user)
    }

    /// Delete a user. Self-protection first, then admin-protection: an admin
    /// account can never be deleted, not even by another admin.
    pub async fn delete_user(&self, actor: &User, target_id: &str) -> DomainResult<()> {
        if actor.id == target_id {
            return Err(DomainError::Forbidden(
                "Users cannot delete their own account".to_string(),
            ));
        }

        let target = self
            .repo
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", target_id))?;

        if target.role == UserRole::Admin {
            return Err(DomainError::Forbidden(
                "Admin accounts cannot be deleted".to_string(),
            ));
        }

        self.repo.delete(target_id).await?;
        info!(actor = %actor.username, target = %target.username, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryUsers;

    fn service(repo: Arc<InMemoryUsers>) -> IdentityService<InMemoryUsers> {
        IdentityService::new(repo, JwtConfig::default(), true)
    }

    async fn register_one(
        svc: &IdentityService<InMemoryUsers>,
        username: &str,
        password: &str,
        role: UserRole,
    ) -> User {
        svc.register(RegisterUser {
            username: username.to_string(),
            password: password.to_string(),
            role: Some(role),
            full_name: None,
            email: None,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn authenticate_returns_identity_and_token() {
        let repo = Arc::new(InMemoryUsers::default());
        let svc = service(repo);
        register_one(&svc, "manager", "managerpass", UserRole::Manager).await;

        let auth = svc.authenticate("manager", "managerpass").await.unwrap();
        assert_eq!(auth.user.username, "manager");
        assert_eq!(auth.token_type, "bearer");
        assert!(!auth.token.is_empty());
    }

    #[tokio::test]
    async fn missing_user_and_wrong_password_are_indistinguishable() {
        let repo = Arc::new(InMemoryUsers::default());
        let svc = service(repo);
        register_one(&svc, "manager", "managerpass", UserRole::Manager).await;

        let absent = svc.authenticate("nobody", "whatever").await.unwrap_err();
        let wrong = svc.authenticate("manager", "wrongpass").await.unwrap_err();
        assert_eq!(absent.to_string(), wrong.to_string());
        assert!(matches!(absent, DomainError::Unauthorized(_)));
        assert!(matches!(wrong, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn inactive_account_is_rejected_with_the_same_signal() {
        let repo = Arc::new(InMemoryUsers::default());
        let svc = service(repo.clone());
        register_one(&svc, "manager", "managerpass", UserRole::Manager).await;
        repo.deactivate("manager");

        let err = svc.authenticate("manager", "managerpass").await.unwrap_err();
        assert_eq!(err.to_string(), "Incorrect username or password");
    }

    #[tokio::test]
    async fn legacy_test_hash_accounts_can_log_in() {
        let repo = Arc::new(InMemoryUsers::default());
        let svc = service(repo.clone());
        let created = svc.seed_test_users().await.unwrap();
        assert_eq!(created, vec!["manager", "engineer", "observer"]);

        assert!(svc.authenticate("observer", "view123").await.is_ok());

        // Seeding again is a no-op.
        assert!(svc.seed_test_users().await.unwrap().is_empty());

        // With the shim disabled the same stored hash no longer matches.
        let strict = IdentityService::new(repo, JwtConfig::default(), false);
        assert!(strict.authenticate("observer", "view123").await.is_err());
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts_and_keeps_one_row() {
        let repo = Arc::new(InMemoryUsers::default());
        let svc = service(repo.clone());
        register_one(&svc, "manager", "first", UserRole::Manager).await;

        let err = svc
            .register(RegisterUser {
                username: "manager".to_string(),
                password: "second".to_string(),
                role: None,
                full_name: None,
                email: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn nobody_can_change_their_own_role() {
        let repo = Arc::new(InMemoryUsers::default());
        let svc = service(repo.clone());
        let admin = register_one(&svc, "root", "rootpass", UserRole::Admin).await;

        let err = svc
            .change_role(&admin, &admin.id, UserRole::Observer)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        // Store unchanged.
        let reread = repo.find_by_id(&admin.id).await.unwrap().unwrap();
        assert_eq!(reread.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn nobody_can_delete_their_own_account() {
        let repo = Arc::new(InMemoryUsers::default());
        let svc = service(repo.clone());
        let admin = register_one(&svc, "root", "rootpass", UserRole::Admin).await;

        let err = svc.delete_user(&admin, &admin.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn admin_accounts_are_undeletable_by_anyone() {
        let repo = Arc::new(InMemoryUsers::default());
        let svc = service(repo.clone());
        let first = register_one(&svc, "root", "rootpass", UserRole::Admin).await;
        let second = register_one(&svc, "root2", "rootpass", UserRole::Admin).await;

        let err = svc.delete_user(&first, &second.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn regular_users_can_be_deleted_by_admins() {
        let repo = Arc::new(InMemoryUsers::default());
        let svc = service(repo.clone());
        let admin = register_one(&svc, "root", "rootpass", UserRole::Admin).await;
        let engineer = register_one(&svc, "eng", "engpass", UserRole::Engineer).await;

        svc.delete_user(&admin, &engineer.id).await.unwrap();
        assert!(repo.find_by_id(&engineer.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn profile_patch_updates_only_given_fields() {
        let repo = Arc::new(InMemoryUsers::default());
        let svc = service(repo);
        let user = register_one(&svc, "eng", "engpass", UserRole::Engineer).await;

        let updated = svc
            .update_profile(
                &user.id,
                ProfilePatch {
                    email: Some("eng@site.example".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email.as_deref(), Some("eng@site.example"));
        assert_eq!(updated.full_name, user.full_name);
        assert_eq!(updated.username, "eng");
    }
}
