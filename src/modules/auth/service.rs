use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::utils::password::verify_password;
use anyhow::Context;
use sqlx::PgPool;
use studentdesk_auth::{Role, create_access_token};
use studentdesk_config::JwtConfig;
use studentdesk_core::AppError;
use studentdesk_models::UserRecord;
use tracing::{info, instrument, warn};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, password, role, created_at FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user for login")
        .map_err(AppError::database)?;

        let Some(user) = user else {
            warn!("Login failed: unknown username");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &user.password)? {
            warn!(user.id = %user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let role = Role::from(user.role);
        let access_token = create_access_token(user.id, &user.username, &role, jwt_config)?;

        info!(user.id = %user.id, role = %role, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            role: role.to_string(),
        })
    }
}
