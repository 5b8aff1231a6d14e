use validator::Validate;

use crate::error::{Error, Result};
use crate::models::user::{User, UserRole};

#[derive(Debug, Validate)]
struct NewUser<'a> {
    #[validate(length(min = 1, message = "Name is required"))]
    name: &'a str,
    #[validate(email(message = "Invalid email address"))]
    email: &'a str,
}

/// Admin-only. Initials are derived from the name, never supplied.
pub fn create_user(
    name: &str,
    email: &str,
    role: UserRole,
    acting_user: &User,
    users: &mut Vec<User>,
) -> Result<String> {
    if acting_user.role != UserRole::Admin {
        return Err(Error::Unauthorized(
            "Only admins can manage users".to_string(),
        ));
    }
    NewUser { name, email }.validate()?;

    let user = User::new(name, email, role);
    let id = user.id.clone();
    users.push(user);
    Ok(id)
}

/// Admin-only; a user cannot remove their own account. An unresolved id is a
/// no-op.
pub fn delete_user(user_id: &str, acting_user: &User, users: &mut Vec<User>) -> Result<bool> {
    if acting_user.role != UserRole::Admin {
        return Err(Error::Unauthorized(
            "Only admins can manage users".to_string(),
        ));
    }
    if user_id == acting_user.id {
        return Err(Error::Conflict(
            "You cannot delete your own account".to_string(),
        ));
    }
    let before = users.len();
    users.retain(|u| u.id != user_id);
    Ok(users.len() != before)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        User {
            id: "u-1".to_string(),
            name: "System Admin".to_string(),
            email: "admin@mvm-logistics.co.uk".to_string(),
            role: UserRole::Admin,
            initials: "SA".to_string(),
        }
    }

    #[test]
    fn created_users_get_derived_initials() {
        let mut users = vec![admin()];
        let id = create_user(
            "Tom Keen",
            "tom@stpj.co.uk",
            UserRole::Recruiter,
            &admin(),
            &mut users,
        )
        .unwrap();
        let created = users.iter().find(|u| u.id == id).unwrap();
        assert_eq!(created.initials, "TK");
        assert_eq!(created.role, UserRole::Recruiter);
    }

    #[test]
    fn invalid_email_is_rejected() {
        let mut users = vec![admin()];
        let err = create_user("Tom Keen", "not-an-email", UserRole::ReadOnly, &admin(), &mut users)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn non_admins_cannot_manage_users() {
        let recruiter = User {
            role: UserRole::Recruiter,
            ..admin()
        };
        let mut users = vec![admin()];
        let err = create_user("X Y", "x@y.co.uk", UserRole::Admin, &recruiter, &mut users)
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn self_deletion_is_a_conflict() {
        let mut users = vec![admin()];
        let err = delete_user("u-1", &admin(), &mut users).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(users.len(), 1);

        assert!(!delete_user("missing", &admin(), &mut users).unwrap());
    }
}
