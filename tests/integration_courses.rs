mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_course, create_test_user, request, setup_db_app};
use serde_json::json;
use sqlx::PgPool;
use studentdesk_auth::Role;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Postgres"]
async fn test_admin_creates_course_with_instructor(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;
    let instructor = create_test_user(&pool, Role::Other("teacher".to_string())).await;
    let app = setup_db_app(pool);

    let response = app
        .oneshot(request(
            "POST",
            "/api/courses",
            Some(&admin.token()),
            Some(json!({
                "name": "Linear Algebra",
                "description": "Vectors and matrices",
                "instructor_id": instructor.id
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Linear Algebra");
    assert_eq!(body["instructor"]["id"], instructor.id.to_string());
    assert_eq!(body["instructor"]["username"], instructor.username);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Postgres"]
async fn test_student_cannot_create_course(pool: PgPool) {
    let student = create_test_user(&pool, Role::Student).await;
    let app = setup_db_app(pool);

    let response = app
        .oneshot(request(
            "POST",
            "/api/courses",
            Some(&student.token()),
            Some(json!({ "name": "Chemistry" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Postgres"]
async fn test_any_principal_lists_courses(pool: PgPool) {
    let student = create_test_user(&pool, Role::Student).await;
    create_test_course(&pool, "Biology", None).await;
    create_test_course(&pool, "Art", None).await;
    let app = setup_db_app(pool);

    let response = app
        .oneshot(request("GET", "/api/courses", Some(&student.token()), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["data"][0]["name"], "Art");
    assert!(body["data"][0]["instructor"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Postgres"]
async fn test_update_and_delete_course(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;
    let course_id = create_test_course(&pool, "Physics", None).await;
    let app = setup_db_app(pool);
    let uri = format!("/api/courses/{}", course_id);

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &uri,
            Some(&admin.token()),
            Some(json!({ "description": "Mechanics" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Physics");
    assert_eq!(body["description"], "Mechanics");

    let response = app
        .clone()
        .oneshot(request("DELETE", &uri, Some(&admin.token()), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request("GET", &uri, Some(&admin.token()), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
