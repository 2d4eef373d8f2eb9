//! Enrollment data models and DTOs.
//!
//! Re-exports the enrollment models from the `studentdesk-models` crate.

pub use studentdesk_models::enrollments::*;
