//! Persistence for student profiles.
//!
//! [`StudentRepository`] is the seam between the service and storage. The
//! service only ever talks to the trait, so it can be driven by
//! [`PgStudentRepository`] in production and by an in-memory store in tests.

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use studentdesk_core::AppError;

use super::model::{CreateStudentDto, Student, StudentFilter, UpdateStudentDto};

const STUDENT_COLUMNS: &str =
    "id, user_id, dob, registration_date, grade_level, created_at, updated_at";

/// A page request against the students table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudentListQuery {
    /// Restrict to the profile owned by this user. `None` lists every profile.
    pub owner: Option<Uuid>,
    pub filter: StudentFilter,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Returns one page of matching profiles, ordered by registration date,
    /// together with the total number of matches.
    async fn list(&self, query: StudentListQuery) -> Result<(Vec<Student>, i64), AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, AppError>;

    async fn create(&self, dto: &CreateStudentDto) -> Result<Student, AppError>;

    /// Applies the provided fields and returns the updated row, or `None`
    /// when `id` does not exist.
    async fn update(&self, id: Uuid, dto: &UpdateStudentDto) -> Result<Option<Student>, AppError>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone, Debug)]
pub struct PgStudentRepository {
    db: PgPool,
}

impl PgStudentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn push_conditions<'a>(builder: &mut QueryBuilder<'a, Postgres>, query: &StudentListQuery) {
    builder.push(" WHERE 1=1");

    if let Some(owner) = query.owner {
        builder.push(" AND user_id = ").push_bind(owner);
    }
    if let Some(dob) = query.filter.dob {
        builder.push(" AND dob = ").push_bind(dob);
    }
    if let Some(registration_date) = query.filter.registration_date {
        builder
            .push(" AND registration_date = ")
            .push_bind(registration_date);
    }
}

fn map_write_error(e: sqlx::Error, user_id: Option<Uuid>) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return match user_id {
                Some(user_id) => AppError::bad_request(anyhow!(
                    "User {} already has a student profile",
                    user_id
                )),
                None => AppError::bad_request(anyhow!("Student profile already exists")),
            };
        }
        if db_err.is_foreign_key_violation() {
            return AppError::bad_request(anyhow!("User does not exist"));
        }
    }
    AppError::database(anyhow::Error::from(e))
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    #[instrument(skip(self))]
    async fn list(&self, query: StudentListQuery) -> Result<(Vec<Student>, i64), AppError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM students");
        push_conditions(&mut count, &query);

        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.db)
            .await
            .context("Failed to count students")
            .map_err(AppError::database)?;

        let mut select =
            QueryBuilder::<Postgres>::new(format!("SELECT {STUDENT_COLUMNS} FROM students"));
        push_conditions(&mut select, &query);
        select
            .push(" ORDER BY registration_date DESC, id")
            .push(" LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        let students = select
            .build_query_as::<Student>()
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)?;

        Ok((students, total))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1");

        sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .context("Failed to fetch student by ID")
            .map_err(AppError::database)
    }

    #[instrument(skip(self, dto))]
    async fn create(&self, dto: &CreateStudentDto) -> Result<Student, AppError> {
        let sql = format!(
            r#"
            INSERT INTO students (user_id, dob, registration_date, grade_level)
            VALUES ($1, $2, $3, $4)
            RETURNING {STUDENT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Student>(&sql)
            .bind(dto.user_id)
            .bind(dto.dob)
            .bind(dto.registration_date_or_today())
            .bind(&dto.grade_level)
            .fetch_one(&self.db)
            .await
            .map_err(|e| map_write_error(e, Some(dto.user_id)))
    }

    #[instrument(skip(self, dto))]
    async fn update(&self, id: Uuid, dto: &UpdateStudentDto) -> Result<Option<Student>, AppError> {
        let sql = format!(
            r#"
            UPDATE students
            SET dob = COALESCE($2, dob),
                registration_date = COALESCE($3, registration_date),
                grade_level = COALESCE($4, grade_level),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {STUDENT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .bind(dto.dob)
            .bind(dto.registration_date)
            .bind(&dto.grade_level)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| map_write_error(e, None))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }
}
