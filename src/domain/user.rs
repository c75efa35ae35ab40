//! User account domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::Role;

/// Authenticated account with a role in the access-control hierarchy.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Argon2 hash; never serialized under any circumstance.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Check whether this user satisfies a required minimum role.
    pub fn has_permission(&self, required: Role) -> bool {
        self.role.can_access(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: Role) -> User {
        User {
            id: 7,
            username: "plant_manager".to_string(),
            password_hash: "secret-hash".to_string(),
            role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let json = serde_json::to_value(sample_user(Role::Admin)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "plant_manager");
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn test_has_permission_follows_hierarchy() {
        assert!(sample_user(Role::SuperAdmin).has_permission(Role::Admin));
        assert!(!sample_user(Role::User).has_permission(Role::Admin));
    }
}
