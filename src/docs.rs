use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};
use crate::modules::enrollments::model::{CreateEnrollmentDto, Enrollment};
use crate::modules::health::controller::HealthResponse;
use crate::modules::students::model::{CreateStudentDto, Student, UpdateStudentDto};
use studentdesk_auth::Principal;
use studentdesk_core::{PaginationMeta, PaginationParams};
use studentdesk_models::UserSummary;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::me,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::enrollments::controller::list_enrollments,
        crate::modules::enrollments::controller::create_enrollment,
        crate::modules::enrollments::controller::delete_enrollment,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            LoginResponse,
            Principal,
            ErrorResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            UserSummary,
            Enrollment,
            CreateEnrollmentDto,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Authentication", description = "Login and the current principal"),
        (name = "Students", description = "Student profiles, filtered by the caller's role"),
        (name = "Courses", description = "Course catalogue"),
        (name = "Enrollments", description = "Student-to-course enrollments")
    ),
    info(
        title = "StudentDesk API",
        version = "0.1.0",
        description = "Student management REST API with role-based access control and a read-through profile cache.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
