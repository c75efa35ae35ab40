//! Role hierarchy used for authorization decisions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::ValidationError;

use crate::config::{ROLE_ADMIN, ROLE_SUPER_ADMIN, ROLE_USER};

/// User roles, totally ordered: `user < admin < super_admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Numeric rank backing the hierarchy comparison.
    pub fn rank(&self) -> u8 {
        match self {
            Role::User => 1,
            Role::Admin => 2,
            Role::SuperAdmin => 3,
        }
    }

    /// Check whether this role satisfies a required minimum role.
    ///
    /// `super_admin` passes every check; `admin` passes `admin`- and
    /// `user`-gated operations; `user` passes only `user`-gated ones.
    pub fn can_access(&self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
            Role::SuperAdmin => ROLE_SUPER_ADMIN,
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(Role::User),
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_SUPER_ADMIN => Ok(Role::SuperAdmin),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validator hook for request DTOs carrying a role string.
pub fn validate_role(value: &str) -> Result<(), ValidationError> {
    Role::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_role"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert!(Role::User.rank() < Role::Admin.rank());
        assert!(Role::Admin.rank() < Role::SuperAdmin.rank());
    }

    #[test]
    fn test_can_access() {
        // user token against admin-gated operation is rejected
        assert!(!Role::User.can_access(Role::Admin));
        // super_admin passes every check
        assert!(Role::SuperAdmin.can_access(Role::Admin));
        assert!(Role::SuperAdmin.can_access(Role::User));
        assert!(Role::SuperAdmin.can_access(Role::SuperAdmin));
        // admin passes admin- and user-gated operations but not super_admin
        assert!(Role::Admin.can_access(Role::User));
        assert!(Role::Admin.can_access(Role::Admin));
        assert!(!Role::Admin.can_access(Role::SuperAdmin));
        // same-rank access
        assert!(Role::User.can_access(Role::User));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Role::from_str("user"), Ok(Role::User));
        assert_eq!(Role::from_str("admin"), Ok(Role::Admin));
        assert_eq!(Role::from_str("super_admin"), Ok(Role::SuperAdmin));
        assert!(Role::from_str("root").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for role in [Role::User, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::from_str(&role.to_string()), Ok(role));
        }
    }

    #[test]
    fn test_validate_role() {
        assert!(validate_role("admin").is_ok());
        assert!(validate_role("manager").is_err());
    }
}
