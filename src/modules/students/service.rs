use std::sync::Arc;

use anyhow::anyhow;
use studentdesk_auth::Principal;
use studentdesk_core::{AppError, Paginated};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::cache::{CacheStatus, ProfileCache};
use super::model::{
    CreateStudentDto, Student, StudentFilterParams, UpdateStudentDto, check_profile_dates,
};
use super::policy::{
    AuditedResource, StudentAction, Visibility, authorize_action, resolve_visibility,
};
use super::repository::{StudentListQuery, StudentRepository};

fn student_not_found() -> AppError {
    AppError::not_found(anyhow!("Student not found"))
}

/// Student profile operations.
///
/// Every operation takes the requesting [`Principal`] and applies the
/// visibility policy before touching storage. Records outside the caller's
/// visibility are reported as not found.
#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
    cache: ProfileCache,
}

impl std::fmt::Debug for StudentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudentService")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentRepository>, cache: ProfileCache) -> Self {
        Self { repo, cache }
    }

    #[instrument(skip(self, principal), fields(user.id = %principal.user_id))]
    pub async fn list(
        &self,
        principal: &Principal,
        params: &StudentFilterParams,
    ) -> Result<Paginated<Student>, AppError> {
        authorize_action(principal, StudentAction::List)?;

        let pagination = params.pagination();
        let Some(scope) =
            resolve_visibility(principal, AuditedResource::StudentProfiles).owner_scope()
        else {
            return Ok(Paginated::empty(&pagination));
        };

        let (students, total) = self
            .repo
            .list(StudentListQuery {
                owner: scope.user_id(),
                filter: params.filter(),
                limit: pagination.limit(),
                offset: pagination.offset(),
            })
            .await?;

        Ok(Paginated::new(students, total, &pagination))
    }

    /// Retrieves a single profile, read-through the profile cache.
    ///
    /// The visibility check runs against whichever snapshot is served, so a
    /// cached entry never leaks to a principal who could not fetch it.
    #[instrument(skip(self, principal), fields(user.id = %principal.user_id))]
    pub async fn retrieve(
        &self,
        principal: &Principal,
        id: Uuid,
    ) -> Result<(Student, CacheStatus), AppError> {
        authorize_action(principal, StudentAction::Retrieve)?;

        let visibility = resolve_visibility(principal, AuditedResource::StudentProfiles);
        if visibility == Visibility::Nothing {
            return Err(student_not_found());
        }

        if let Some(student) = self.cache.get(id).await {
            return if visibility.permits(&student) {
                Ok((student, CacheStatus::Hit))
            } else {
                Err(student_not_found())
            };
        }

        let student = self
            .repo
            .find_by_id(id)
            .await?
            .filter(|s| visibility.permits(s))
            .ok_or_else(student_not_found)?;

        self.cache.put(&student).await;

        Ok((student, CacheStatus::Miss))
    }

    #[instrument(skip(self, principal, dto), fields(user.id = %principal.user_id))]
    pub async fn create(
        &self,
        principal: &Principal,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        authorize_action(principal, StudentAction::Create)?;
        dto.validate().map_err(AppError::validation)?;

        let student = self.repo.create(&dto).await?;

        info!(student.id = %student.id, owner = %student.user_id, "Student profile created");
        Ok(student)
    }

    /// Applies a partial update and drops the cached snapshot.
    #[instrument(skip(self, principal, dto), fields(user.id = %principal.user_id))]
    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        authorize_action(principal, StudentAction::Update)?;

        let visibility = resolve_visibility(principal, AuditedResource::StudentProfiles);
        if visibility == Visibility::Nothing {
            return Err(student_not_found());
        }

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .filter(|s| visibility.permits(s))
            .ok_or_else(student_not_found)?;

        dto.validate().map_err(AppError::validation)?;

        let (dob, registration_date) = dto.merged_dates(&existing);
        if let Err(e) = check_profile_dates(dob, registration_date) {
            let mut errors = ValidationErrors::new();
            errors.add("dob", e);
            return Err(AppError::validation(errors));
        }

        let updated = self
            .repo
            .update(id, &dto)
            .await?
            .ok_or_else(student_not_found)?;

        self.cache.invalidate(id).await;

        info!(student.id = %id, "Student profile updated");
        Ok(updated)
    }

    /// Deletes a profile. Admin only.
    ///
    /// The cached snapshot is dropped whether or not the row existed.
    #[instrument(skip(self, principal), fields(user.id = %principal.user_id))]
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        authorize_action(principal, StudentAction::Delete)?;

        let deleted = self.repo.delete(id).await?;
        self.cache.invalidate(id).await;

        if !deleted {
            return Err(student_not_found());
        }

        info!(student.id = %id, "Student profile deleted");
        Ok(())
    }
}
