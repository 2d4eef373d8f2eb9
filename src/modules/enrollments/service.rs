use crate::modules::enrollments::model::{CreateEnrollmentDto, Enrollment};
use crate::modules::students::policy::{AuditedResource, resolve_visibility};
use anyhow::{Context, anyhow};
use sqlx::{PgPool, Postgres, QueryBuilder};
use studentdesk_auth::Principal;
use studentdesk_core::{AppError, Paginated, PaginationParams};
use tracing::{info, instrument};
use uuid::Uuid;

pub struct EnrollmentService;

impl EnrollmentService {
    /// Lists the enrollments whose student record is visible to `principal`.
    #[instrument(skip(db, principal), fields(user.id = %principal.user_id))]
    pub async fn list_enrollments(
        db: &PgPool,
        principal: &Principal,
        params: &PaginationParams,
    ) -> Result<Paginated<Enrollment>, AppError> {
        let Some(scope) =
            resolve_visibility(principal, AuditedResource::Enrollments).owner_scope()
        else {
            return Ok(Paginated::empty(params));
        };
        let owner = scope.user_id();

        let mut count = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM enrollments e JOIN students s ON s.id = e.student_id",
        );
        if let Some(owner) = owner {
            count.push(" WHERE s.user_id = ").push_bind(owner);
        }

        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(db)
            .await
            .context("Failed to count enrollments")
            .map_err(AppError::database)?;

        let mut select = QueryBuilder::<Postgres>::new(
            "SELECT e.id, e.student_id, e.course_id, e.enrolled_at \
             FROM enrollments e JOIN students s ON s.id = e.student_id",
        );
        if let Some(owner) = owner {
            select.push(" WHERE s.user_id = ").push_bind(owner);
        }
        select
            .push(" ORDER BY e.enrolled_at DESC, e.id LIMIT ")
            .push_bind(params.limit())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let enrollments = select
            .build_query_as::<Enrollment>()
            .fetch_all(db)
            .await
            .context("Failed to fetch enrollments")
            .map_err(AppError::database)?;

        Ok(Paginated::new(enrollments, total, params))
    }

    #[instrument(skip(db))]
    pub async fn create_enrollment(
        db: &PgPool,
        dto: CreateEnrollmentDto,
    ) -> Result<Enrollment, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (student_id, course_id)
            VALUES ($1, $2)
            RETURNING id, student_id, course_id, enrolled_at
            "#,
        )
        .bind(dto.student_id)
        .bind(dto.course_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow!(
                        "Student is already enrolled in this course"
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow!("Student or course does not exist"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        info!(enrollment.id = %enrollment.id, "Enrollment created");
        Ok(enrollment)
    }

    #[instrument(skip(db))]
    pub async fn delete_enrollment(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete enrollment")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Enrollment not found")));
        }

        Ok(())
    }
}
