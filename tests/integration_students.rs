mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{
    body_json, create_item, create_student, create_teacher, empty_request, generate_unique_email,
    insert_loan, json_request, login_student, login_teacher, send, setup_test_app,
};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_as_teacher(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let app = setup_test_app(pool);
    let token = login_teacher(&app, &teacher.email).await;
    let email = generate_unique_email();

    let response = send(
        &app,
        json_request(
            "POST",
            "/teacher/students",
            Some(&token),
            json!({ "name": "Tanaka", "email": email, "student_number": "S123456" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["student_number"], "S123456");

    // and the student can now log in with that number
    login_student(&app, "S123456").await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_rejects_long_number(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let app = setup_test_app(pool);
    let token = login_teacher(&app, &teacher.email).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/teacher/students",
            Some(&token),
            json!({
                "name": "Tanaka",
                "email": generate_unique_email(),
                "student_number": "12345678"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_duplicate_number(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let existing = create_student(&pool).await;
    let app = setup_test_app(pool);
    let token = login_teacher(&app, &teacher.email).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/teacher/students",
            Some(&token),
            json!({
                "name": "Copy",
                "email": generate_unique_email(),
                "student_number": existing.student_number
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_manage_students(pool: SqlitePool) {
    let student = create_student(&pool).await;
    let app = setup_test_app(pool);
    let token = login_student(&app, &student.student_number).await;

    let response = send(&app, empty_request("GET", "/teacher/students", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_and_get_students(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let first = create_student(&pool).await;
    create_student(&pool).await;
    let app = setup_test_app(pool);
    let token = login_teacher(&app, &teacher.email).await;

    let response = send(&app, empty_request("GET", "/teacher/students", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = send(
        &app,
        empty_request("GET", &format!("/teacher/students/{}", first.id), Some(&token)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["student_number"], first.student_number);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_partial(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let student = create_student(&pool).await;
    let app = setup_test_app(pool);
    let token = login_teacher(&app, &teacher.email).await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/teacher/students/{}", student.id),
            Some(&token),
            json!({ "name": "Renamed" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Renamed");
    assert_eq!(body["student_number"], student.student_number);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_unknown_student(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let app = setup_test_app(pool);
    let token = login_teacher(&app, &teacher.email).await;

    let response = send(
        &app,
        json_request(
            "PUT",
            "/teacher/students/4242",
            Some(&token),
            json!({ "name": "Ghost" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_student(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let student = create_student(&pool).await;
    let app = setup_test_app(pool);
    let token = login_teacher(&app, &teacher.email).await;

    let uri = format!("/teacher/students/{}", student.id);
    let response = send(&app, empty_request("DELETE", &uri, Some(&token))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, empty_request("DELETE", &uri, Some(&token))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_student_with_loans_is_conflict(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let student = create_student(&pool).await;
    let item_id = create_item(&pool, teacher.id, "Cable", 1, true).await;
    insert_loan(&pool, item_id, student.id, Utc::now(), 1).await;
    let app = setup_test_app(pool);
    let token = login_teacher(&app, &teacher.email).await;

    let response = send(
        &app,
        empty_request("DELETE", &format!("/teacher/students/{}", student.id), Some(&token)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}
