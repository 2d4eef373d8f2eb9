//! The authenticated identity behind a request.

use serde::Serialize;
use studentdesk_core::AppError;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::claims::Claims;
use crate::role::Role;

/// The principal making a request.
///
/// Resolved once per request from a verified token and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
    #[schema(value_type = String)]
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: Uuid, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl TryFrom<Claims> for Principal {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))?;

        Ok(Self {
            user_id,
            username: claims.username,
            role: Role::from(claims.role),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, role: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            username: "ada".to_string(),
            role: role.to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_principal_from_claims() {
        let user_id = Uuid::new_v4();
        let principal = Principal::try_from(claims(&user_id.to_string(), "student")).unwrap();

        assert_eq!(principal.user_id, user_id);
        assert_eq!(principal.username, "ada");
        assert_eq!(principal.role, Role::Student);
    }

    #[test]
    fn test_principal_rejects_malformed_subject() {
        let err = Principal::try_from(claims("not-a-uuid", "admin")).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }
}
