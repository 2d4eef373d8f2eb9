use crate::modules::courses::model::{Course, CourseRow, CreateCourseDto, UpdateCourseDto};
use anyhow::{Context, anyhow};
use sqlx::PgPool;
use studentdesk_core::{AppError, Paginated, PaginationParams};
use tracing::instrument;
use uuid::Uuid;

const COURSE_SELECT: &str = r#"
    SELECT c.id, c.name, c.description,
           c.instructor_id, u.username AS instructor_username,
           c.created_at, c.updated_at
    FROM courses c
    LEFT JOIN users u ON u.id = c.instructor_id
"#;

fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::bad_request(anyhow!("A course with this name already exists"));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::bad_request(anyhow!("Instructor does not exist"));
        }
    }
    AppError::database(anyhow::Error::from(e))
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn list_courses(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<Paginated<Course>, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(db)
            .await
            .context("Failed to count courses")
            .map_err(AppError::database)?;

        let sql = format!("{COURSE_SELECT} ORDER BY c.name LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, CourseRow>(&sql)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(db)
            .await
            .context("Failed to fetch courses")
            .map_err(AppError::database)?;

        let courses = rows.into_iter().map(Course::from).collect();
        Ok(Paginated::new(courses, total, params))
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        let sql = format!("{COURSE_SELECT} WHERE c.id = $1");

        sqlx::query_as::<_, CourseRow>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch course by ID")
            .map_err(AppError::database)?
            .map(Course::from)
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO courses (name, description, instructor_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.instructor_id)
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        Self::get_course(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let updated: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE courses
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                instructor_id = COALESCE($4, instructor_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.instructor_id)
        .fetch_optional(db)
        .await
        .map_err(map_write_error)?;

        match updated {
            Some(id) => Self::get_course(db, id).await,
            None => Err(AppError::not_found(anyhow!("Course not found"))),
        }
    }

    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete course")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }

        Ok(())
    }
}
