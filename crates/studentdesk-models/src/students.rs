//! Student domain models and DTOs.
//!
//! A [`Student`] is the profile record owned by a user account. The
//! authorization policy filters on `user_id`; everything else is profile
//! data that callers may read or edit within their visibility.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use studentdesk_core::PaginationParams;
use studentdesk_core::pagination::deserialize_optional_i64;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A student profile as stored in the database.
///
/// This is also the snapshot kept in the profile cache, so it must
/// round-trip through JSON unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    /// The user account that owns this profile
    pub user_id: Uuid,
    #[schema(example = "2008-04-12")]
    pub dob: NaiveDate,
    #[schema(example = "2024-09-01")]
    pub registration_date: NaiveDate,
    pub grade_level: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a student profile.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateStudentDto {
    pub user_id: Uuid,
    pub dob: NaiveDate,
    /// Defaults to today when omitted
    pub registration_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 10))]
    pub grade_level: Option<String>,
}

impl CreateStudentDto {
    pub fn registration_date_or_today(&self) -> NaiveDate {
        self.registration_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// DTO for updating a student profile.
///
/// All fields are optional; only provided fields are changed. An explicit
/// `null` is treated the same as an omitted field, so `grade_level` cannot
/// be cleared once set.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    pub dob: Option<NaiveDate>,
    pub registration_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 10))]
    pub grade_level: Option<String>,
}

impl UpdateStudentDto {
    /// Applies the changes to `existing`, returning the resulting profile dates.
    pub fn merged_dates(&self, existing: &Student) -> (NaiveDate, NaiveDate) {
        (
            self.dob.unwrap_or(existing.dob),
            self.registration_date
                .unwrap_or(existing.registration_date),
        )
    }
}

/// Query parameters accepted by the student list endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentFilterParams {
    /// Exact date of birth (`YYYY-MM-DD`)
    pub dob: Option<NaiveDate>,
    /// Exact registration date (`YYYY-MM-DD`)
    pub registration_date: Option<NaiveDate>,
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

/// Exact-match filters applied to a student listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StudentFilter {
    pub dob: Option<NaiveDate>,
    pub registration_date: Option<NaiveDate>,
}

impl StudentFilter {
    pub fn matches(&self, student: &Student) -> bool {
        self.dob.is_none_or(|dob| student.dob == dob)
            && self
                .registration_date
                .is_none_or(|date| student.registration_date == date)
    }
}

impl StudentFilterParams {
    pub fn filter(&self) -> StudentFilter {
        StudentFilter {
            dob: self.dob,
            registration_date: self.registration_date,
        }
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Checks that a date of birth is not in the future and not after the
/// registration date.
pub fn check_profile_dates(
    dob: NaiveDate,
    registration_date: NaiveDate,
) -> Result<(), ValidationError> {
    if dob > Utc::now().date_naive() {
        return Err(ValidationError::new("dob_in_future")
            .with_message(Cow::Borrowed("dob cannot be in the future")));
    }

    if dob > registration_date {
        return Err(ValidationError::new("dob_after_registration")
            .with_message(Cow::Borrowed("dob must not be after registration_date")));
    }

    Ok(())
}

fn validate_create_dates(dto: &CreateStudentDto) -> Result<(), ValidationError> {
    check_profile_dates(dto.dob, dto.registration_date_or_today())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn student() -> Student {
        let now = Utc::now();
        Student {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            dob: date(2008, 4, 12),
            registration_date: date(2024, 9, 1),
            grade_level: Some("10".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_create_student_dto_validation() {
        let dto = CreateStudentDto {
            user_id: Uuid::new_v4(),
            dob: date(2009, 1, 15),
            registration_date: Some(date(2023, 9, 1)),
            grade_level: Some("9".to_string()),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_student_dto_dob_after_registration() {
        let dto = CreateStudentDto {
            user_id: Uuid::new_v4(),
            dob: date(2024, 1, 15),
            registration_date: Some(date(2023, 9, 1)),
            grade_level: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_student_dto_long_grade_level() {
        let dto = CreateStudentDto {
            user_id: Uuid::new_v4(),
            dob: date(2009, 1, 15),
            registration_date: None,
            grade_level: Some("x".repeat(11)),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("grade_level"));
    }

    #[test]
    fn test_update_student_dto_empty_is_valid() {
        let dto = UpdateStudentDto::default();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_student_dto_empty_grade_level() {
        let dto = UpdateStudentDto {
            grade_level: Some(String::new()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_merged_dates_keep_existing_values() {
        let existing = student();
        let dto = UpdateStudentDto {
            dob: Some(date(2007, 2, 2)),
            ..Default::default()
        };
        let (dob, registration_date) = dto.merged_dates(&existing);
        assert_eq!(dob, date(2007, 2, 2));
        assert_eq!(registration_date, existing.registration_date);
    }

    #[test]
    fn test_check_profile_dates_future_dob() {
        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
        assert!(check_profile_dates(tomorrow, tomorrow).is_err());
    }

    #[test]
    fn test_filter_matches_exact_dates() {
        let s = student();
        assert!(StudentFilter::default().matches(&s));
        assert!(
            StudentFilter {
                dob: Some(s.dob),
                registration_date: None
            }
            .matches(&s)
        );
        assert!(
            !StudentFilter {
                dob: None,
                registration_date: Some(date(2020, 1, 1))
            }
            .matches(&s)
        );
    }

    #[test]
    fn test_student_json_round_trip() {
        let s = student();
        let json = serde_json::to_string(&s).unwrap();
        let back: Student = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn test_filter_params_pagination() {
        let params = StudentFilterParams {
            page: Some(2),
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(params.pagination().offset(), 5);
    }
}
