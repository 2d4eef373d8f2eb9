//! Request extractors for authentication and authorization.
//!
//! - [`auth::AuthUser`]: resolves the bearer token into a [`Principal`](studentdesk_auth::Principal)
//! - [`auth::RequireAdmin`]: additionally rejects non-admin principals with `403`

pub mod auth;
