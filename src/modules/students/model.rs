//! Student data models and DTOs.
//!
//! Re-exports the student models from the `studentdesk-models` crate.

pub use studentdesk_models::students::*;
