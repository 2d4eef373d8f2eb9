//! Authentication data models.
//!
//! Re-exports the login DTOs from the `studentdesk-models` crate.

pub use studentdesk_models::auth::*;
