//! Roles recognised by the authorization policy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role attached to an authenticated principal.
///
/// Only `student` and `admin` carry meaning for the policy; any other role
/// string is preserved verbatim in [`Role::Other`] so it can be reported in
/// audit logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Student,
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
            Role::Other(name) => name.as_str(),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn is_student(&self) -> bool {
        matches!(self, Role::Student)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "student" => Role::Student,
            "admin" => Role::Admin,
            other => Role::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
