//! Cache key generation.

use uuid::Uuid;

/// Prefix of every student profile key.
pub const STUDENT_PROFILE_PREFIX: &str = "student_profile_";

/// Key for a single student profile snapshot.
///
/// Keys depend only on the student id, so every principal allowed to see a
/// profile shares the same cached entry.
pub fn student_profile(student_id: Uuid) -> String {
    format!("{}{}", STUDENT_PROFILE_PREFIX, student_id)
}
