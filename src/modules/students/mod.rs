//! Student profiles.
//!
//! - [`policy`]: which principals may see and change which profiles
//! - [`cache`]: the read-through profile cache
//! - [`repository`]: persistence seam and its PostgreSQL implementation
//! - [`service`]: orchestration of the above

pub mod cache;
pub mod controller;
pub mod model;
pub mod policy;
pub mod repository;
pub mod router;
pub mod service;
