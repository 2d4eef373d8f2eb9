//! Administrative commands run outside the HTTP server.

use anyhow::{Context, anyhow, bail};
use sqlx::PgPool;
use studentdesk_auth::Role;
use studentdesk_models::UserSummary;
use uuid::Uuid;

use crate::utils::password::hash_password;

/// Creates a login account with a bcrypt-hashed password.
///
/// Fails if the username is taken.
pub async fn create_user(
    db: &PgPool,
    username: &str,
    password: &str,
    role: &Role,
) -> anyhow::Result<UserSummary> {
    if username.trim().is_empty() {
        bail!("Username must not be empty");
    }
    if password.len() < 8 {
        bail!("Password must be at least 8 characters");
    }

    let hashed_password =
        hash_password(password).map_err(|e| anyhow!("Failed to hash password: {}", e.error))?;

    let id: Option<Uuid> = sqlx::query_scalar(
        "INSERT INTO users (username, password, role)
         VALUES ($1, $2, $3)
         ON CONFLICT (username) DO NOTHING
         RETURNING id",
    )
    .bind(username)
    .bind(hashed_password)
    .bind(role.as_str())
    .fetch_optional(db)
    .await
    .context("Failed to insert user")?;

    let id = id.ok_or_else(|| anyhow!("User {} already exists", username))?;

    Ok(UserSummary {
        id,
        username: username.to_string(),
    })
}
