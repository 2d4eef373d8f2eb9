//! # StudentDesk Models
//!
//! Domain models and DTOs for the StudentDesk API: database entities,
//! request/response bodies and their validation rules.
//!
//! # Modules
//!
//! - [`auth`]: login request/response bodies
//! - [`courses`]: courses and their instructors
//! - [`enrollments`]: student-to-course enrollments
//! - [`students`]: student profiles and list filters
//! - [`users`]: user accounts backing authentication

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod students;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginRequest, LoginResponse};
pub use courses::{Course, CourseRow, CreateCourseDto, UpdateCourseDto};
pub use enrollments::{CreateEnrollmentDto, Enrollment};
pub use students::{CreateStudentDto, Student, StudentFilter, StudentFilterParams, UpdateStudentDto};
pub use users::{UserRecord, UserSummary};
