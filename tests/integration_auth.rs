mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, request, setup_db_app};
use serde_json::json;
use sqlx::PgPool;
use studentdesk_auth::Role;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Postgres"]
async fn test_login_success(pool: PgPool) {
    let user = create_test_user(&pool, Role::Student).await;
    let app = setup_db_app(pool);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": user.username, "password": user.password })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["role"], "student");

    let token = body["access_token"].as_str().unwrap();
    let response = app
        .oneshot(request("GET", "/api/auth/me", Some(token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["user_id"], user.id.to_string());
    assert_eq!(me["role"], "student");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Postgres"]
async fn test_login_wrong_password(pool: PgPool) {
    let user = create_test_user(&pool, Role::Admin).await;
    let app = setup_db_app(pool);

    let response = app
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": user.username, "password": "wrong-password" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Postgres"]
async fn test_login_unknown_user(pool: PgPool) {
    let app = setup_db_app(pool);

    let response = app
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "nobody", "password": "whatever1" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Postgres"]
async fn test_create_user_rejects_duplicate_username(pool: PgPool) {
    let user = create_test_user(&pool, Role::Student).await;

    let result =
        studentdesk::cli::create_user(&pool, &user.username, "anotherpass1", &Role::Admin).await;
    assert!(result.is_err());
}
