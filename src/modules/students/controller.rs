use crate::middleware::auth::{AuthUser, RequireAdmin};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::students::model::{
    CreateStudentDto, Student, StudentFilterParams, UpdateStudentDto,
};
use crate::state::AppState;
use crate::validator::JsonBody;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
};
use studentdesk_core::{AppError, Paginated};
use tracing::instrument;
use uuid::Uuid;

/// Response header reporting whether a profile came from the cache.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "Students visible to the caller", body = Paginated<Student>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument]
pub async fn list_students(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Query(params): Query<StudentFilterParams>,
) -> Result<Json<Paginated<Student>>, AppError> {
    let page = state.students.list(&principal, &params).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Bad request or profile already exists", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument]
pub async fn create_student(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    JsonBody(dto): JsonBody<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = state.students.create(&principal, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student profile", body = Student,
            headers(("X-Cache" = String, description = "HIT when served from the profile cache, MISS otherwise"))),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument]
pub async fn get_student(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (student, status) = state.students.retrieve(&principal, id).await?;

    Ok((
        [(X_CACHE, HeaderValue::from_static(status.as_str()))],
        Json(student),
    ))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument]
pub async fn update_student(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
    JsonBody(dto): JsonBody<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = state.students.update(&principal, id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument]
pub async fn delete_student(
    State(state): State<AppState>,
    RequireAdmin(principal): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.students.delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
