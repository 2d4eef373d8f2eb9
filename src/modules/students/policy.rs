//! Authorization policy for student records.
//!
//! Two decisions are made per request:
//!
//! - **Visibility**: which records the principal may list or retrieve.
//!   Students see their own profile, admins see everything, any other role
//!   sees nothing.
//! - **Action gate**: `delete` is reserved for admins. Every other action
//!   only requires an authenticated principal.
//!
//! [`Visibility::for_principal`] and [`visible_set`] are pure; the
//! [`resolve_visibility`] entry point used by the service also emits the
//! audit log entry.

use studentdesk_auth::{Principal, Role};
use studentdesk_core::AppError;
use tracing::{info, warn};
use uuid::Uuid;

use super::model::Student;

/// The set of student records a principal may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only records owned by this user id.
    Own(Uuid),
    /// Every record.
    All,
    /// No records at all.
    Nothing,
}

impl Visibility {
    pub fn for_principal(principal: &Principal) -> Self {
        match principal.role {
            Role::Student => Visibility::Own(principal.user_id),
            Role::Admin => Visibility::All,
            Role::Other(_) => Visibility::Nothing,
        }
    }

    pub fn permits(&self, student: &Student) -> bool {
        match self {
            Visibility::Own(user_id) => student.user_id == *user_id,
            Visibility::All => true,
            Visibility::Nothing => false,
        }
    }

    /// Owner restriction to apply to a storage query.
    ///
    /// `None` means the query must not run at all.
    pub fn owner_scope(&self) -> Option<OwnerScope> {
        match self {
            Visibility::Own(user_id) => Some(OwnerScope::User(*user_id)),
            Visibility::All => Some(OwnerScope::Any),
            Visibility::Nothing => None,
        }
    }
}

/// Owner restriction passed down to storage queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
    User(Uuid),
    Any,
}

impl OwnerScope {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            OwnerScope::User(user_id) => Some(*user_id),
            OwnerScope::Any => None,
        }
    }
}

/// Student record actions subject to the action gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentAction {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
}

/// Returns the records in `records` that `principal` may see.
pub fn visible_set<'a>(principal: &Principal, records: &'a [Student]) -> Vec<&'a Student> {
    let visibility = Visibility::for_principal(principal);
    records.iter().filter(|s| visibility.permits(s)).collect()
}

/// Records scoped by student ownership, named in audit entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditedResource {
    StudentProfiles,
    Enrollments,
}

impl AuditedResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditedResource::StudentProfiles => "student_profiles",
            AuditedResource::Enrollments => "enrollments",
        }
    }

    fn own_label(&self) -> &'static str {
        match self {
            AuditedResource::StudentProfiles => "their own profile",
            AuditedResource::Enrollments => "their own enrollments",
        }
    }

    fn all_label(&self) -> &'static str {
        match self {
            AuditedResource::StudentProfiles => "all student profiles",
            AuditedResource::Enrollments => "all enrollments",
        }
    }
}

/// Resolves the principal's visibility over `resource` and records the
/// access in the audit log.
pub fn resolve_visibility(principal: &Principal, resource: AuditedResource) -> Visibility {
    let visibility = Visibility::for_principal(principal);

    match visibility {
        Visibility::Own(_) => info!(
            audit = "self_access",
            resource = resource.as_str(),
            user.id = %principal.user_id,
            user.name = %principal.username,
            "Student {} is accessing {}",
            principal.username,
            resource.own_label()
        ),
        Visibility::All => info!(
            audit = "admin_access",
            resource = resource.as_str(),
            user.id = %principal.user_id,
            user.name = %principal.username,
            "Admin {} is accessing {}",
            principal.username,
            resource.all_label()
        ),
        Visibility::Nothing => warn!(
            audit = "unauthorized_access",
            resource = resource.as_str(),
            user.id = %principal.user_id,
            user.name = %principal.username,
            role = %principal.role,
            "Unauthorized access attempt on {} by {}",
            resource.as_str(),
            principal.username
        ),
    }

    visibility
}

/// Checks the action gate for `action`.
///
/// # Errors
///
/// Returns `403 Forbidden` when a non-admin attempts to delete.
pub fn authorize_action(principal: &Principal, action: StudentAction) -> Result<(), AppError> {
    match action {
        StudentAction::Delete if !principal.is_admin() => {
            warn!(
                user.id = %principal.user_id,
                user.name = %principal.username,
                role = %principal.role,
                "Student delete denied"
            );
            Err(AppError::forbidden("Only admins can delete students"))
        }
        _ => Ok(()),
    }
}
