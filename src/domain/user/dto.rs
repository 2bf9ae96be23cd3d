use super::model::{User, UserRole};

/// Payload for creating a user. The password is hashed before it reaches the
/// repository; the plaintext never crosses this boundary.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// Mutable profile fields. Fields left as `None` are unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl ProfilePatch {
    /// Merge the patch into an existing user, returning the updated record.
    pub fn apply_to(self, mut user: User) -> User {
        if let Some(full_name) = self.full_name {
            user.full_name = Some(full_name);
        }
        if let Some(email) = self.email {
            user.email = Some(email);
        }
        user
    }
}
