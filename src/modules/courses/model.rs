//! Course data models and DTOs.
//!
//! Re-exports the course models from the `studentdesk-models` crate.

pub use studentdesk_models::courses::*;
