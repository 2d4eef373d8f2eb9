//! Shared utilities.
//!
//! - [`password`]: bcrypt password hashing and verification

pub mod password;
