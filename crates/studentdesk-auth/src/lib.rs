//! # StudentDesk Auth
//!
//! Identity types and token utilities for the StudentDesk API.
//!
//! - [`role`]: the [`Role`] carried by every authenticated request
//! - [`principal`]: the per-request [`Principal`] resolved from a token
//! - [`claims`]: JWT claim structure for access tokens
//! - [`jwt`]: token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use studentdesk_auth::{Principal, Role, create_access_token, verify_token};
//! use studentdesk_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "ada", &Role::Student, &config)?;
//!
//! let claims = verify_token(&token, &config)?;
//! let principal = Principal::try_from(claims)?;
//! ```

pub mod claims;
pub mod jwt;
pub mod principal;
pub mod role;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
pub use principal::Principal;
pub use role::Role;
