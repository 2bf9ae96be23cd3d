//! Role-based authorization policy
//!
//! A single capability table consulted by every handler, replacing ad-hoc
//! per-endpoint role comparisons. Self-protection and admin-protection rules
//! (no self role-change, no self delete, admins are undeletable) are layered
//! on top by the identity service before the table is consulted.

use crate::domain::{DomainError, DomainResult, UserRole};

/// An operation subject to the role capability table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateProject,
    ViewProjects,
    CreateDefect,
    UpdateDefect,
    ListUsers,
    CreateUser,
    ChangeUserRole,
    DeleteUser,
    ViewOwnProfile,
    EditOwnProfile,
}

/// The role capability table.
///
/// | Action          | admin | manager | engineer | observer |
/// |-----------------|-------|---------|----------|----------|
/// | CreateProject   | yes   | yes     | no       | no       |
/// | ViewProjects    | yes   | yes     | yes      | yes      |
/// | CreateDefect    | yes   | yes     | yes      | yes      |
/// | UpdateDefect    | yes   | yes     | yes      | no       |
/// | ListUsers       | yes   | yes     | no       | no       |
/// | CreateUser      | yes   | yes     | no       | no       |
/// | ChangeUserRole  | yes   | no      | no       | no       |
/// | DeleteUser      | yes   | no      | no       | no       |
/// | ViewOwnProfile  | yes   | yes     | yes      | yes      |
/// | EditOwnProfile  | yes   | yes     | yes      | yes      |
pub fn is_allowed(role: UserRole, action: Action) -> bool {
    use Action::*;
    use UserRole::*;

    match action {
        ViewProjects | CreateDefect | ViewOwnProfile | EditOwnProfile => true,
        UpdateDefect => matches!(role, Admin | Manager | Engineer),
        CreateProject | ListUsers | CreateUser => matches!(role, Admin | Manager),
        ChangeUserRole | DeleteUser => matches!(role, Admin),
    }
}

/// Check the capability table, yielding `Forbidden` on denial.
///
/// Pure policy check: no IO, no panics. The resulting 403 is distinguishable
/// from the 401 produced by authentication failures.
pub fn authorize(role: UserRole, action: Action) -> DomainResult<()> {
    if is_allowed(role, action) {
        Ok(())
    } else {
        Err(DomainError::Forbidden("Forbidden".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Action::*;
    use super::*;
    use crate::domain::UserRole::*;

    #[test]
    fn capability_matrix_is_reproduced_exactly() {
        // (action, admin, manager, engineer, observer)
        let table = [
            (CreateProject, true, true, false, false),
            (ViewProjects, true, true, true, true),
            (CreateDefect, true, true, true, true),
            (UpdateDefect, true, true, true, false),
            (ListUsers, true, true, false, false),
            (CreateUser, true, true, false, false),
            (ChangeUserRole, true, false, false, false),
            (DeleteUser, true, false, false, false),
            (ViewOwnProfile, true, true, true, true),
            (EditOwnProfile, true, true, true, true),
        ];

        for (action, admin, manager, engineer, observer) in table {
            assert_eq!(is_allowed(Admin, action), admin, "{action:?} admin");
            assert_eq!(is_allowed(Manager, action), manager, "{action:?} manager");
            assert_eq!(is_allowed(Engineer, action), engineer, "{action:?} engineer");
            assert_eq!(is_allowed(Observer, action), observer, "{action:?} observer");
        }
    }

    #[test]
    fn denial_is_an_authorization_failure() {
        let err = authorize(Observer, CreateProject).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }
}
