//! # StudentDesk Core
//!
//! Core types shared by every StudentDesk crate:
//!
//! - [`errors`]: the [`AppError`] type and its HTTP response mapping
//! - [`pagination`]: page-based pagination parameters and response envelopes
//!
//! # Example
//!
//! ```ignore
//! use studentdesk_core::{AppError, PaginationParams};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//!
//! let params = PaginationParams::default();
//! let offset = params.offset();
//! ```

pub mod errors;
pub mod pagination;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{Paginated, PaginationMeta, PaginationParams};
