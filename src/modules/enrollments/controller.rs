use crate::middleware::auth::{AuthUser, RequireAdmin};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::enrollments::model::{CreateEnrollmentDto, Enrollment};
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use studentdesk_core::{AppError, Paginated, PaginationParams};
use tracing::instrument;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/enrollments",
    params(PaginationParams),
    responses(
        (status = 200, description = "Enrollments visible to the caller", body = Paginated<Enrollment>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument]
pub async fn list_enrollments(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Enrollment>>, AppError> {
    let enrollments = EnrollmentService::list_enrollments(&state.db, &principal, &params).await?;
    Ok(Json(enrollments))
}

#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = CreateEnrollmentDto,
    responses(
        (status = 201, description = "Enrollment created", body = Enrollment),
        (status = 400, description = "Already enrolled, or unknown student or course", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument]
pub async fn create_enrollment(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateEnrollmentDto>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    let enrollment = EnrollmentService::create_enrollment(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}",
    params(
        ("id" = Uuid, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 204, description = "Enrollment deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    EnrollmentService::delete_enrollment(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
