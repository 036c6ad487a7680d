mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{
    TEST_PASSWORD, body_json, create_student, create_teacher, empty_request, json_request,
    login_student, login_teacher, send, setup_test_app,
};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_login_sets_session_cookie(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let app = setup_test_app(pool);

    let response = send(
        &app,
        json_request(
            "POST",
            "/teacher/login",
            None,
            json!({ "email": teacher.email, "password": TEST_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("gearlend_session="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    assert_eq!(body["role"], "teacher");
    assert_eq!(body["principal"]["role"], "teacher");
    assert_eq!(body["principal"]["id"], teacher.id);
    assert!(body["principal"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_login_wrong_password(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let app = setup_test_app(pool);

    let response = send(
        &app,
        json_request(
            "POST",
            "/teacher/login",
            None,
            json!({ "email": teacher.email, "password": "wrong-password" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "invalid_credentials");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_login_unknown_email_is_indistinguishable(pool: SqlitePool) {
    let app = setup_test_app(pool);

    let response = send(
        &app,
        json_request(
            "POST",
            "/teacher/login",
            None,
            json!({ "email": "nobody@test.com", "password": TEST_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "invalid_credentials");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_login_by_number(pool: SqlitePool) {
    let student = create_student(&pool).await;
    let app = setup_test_app(pool);

    let response = send(
        &app,
        json_request(
            "POST",
            "/student/login",
            None,
            json!({ "student_number": student.student_number }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["role"], "student");
    assert_eq!(body["principal"]["student_number"], student.student_number);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_login_unknown_number(pool: SqlitePool) {
    let app = setup_test_app(pool);

    let response = send(
        &app,
        json_request(
            "POST",
            "/student/login",
            None,
            json!({ "student_number": "0000000" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "unknown_student_number");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_login_missing_field_is_bad_request(pool: SqlitePool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("POST", "/student/login", None, json!({}))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("student_number"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_home_returns_current_principal(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let student = create_student(&pool).await;
    let app = setup_test_app(pool);

    let teacher_token = login_teacher(&app, &teacher.email).await;
    let response = send(&app, empty_request("GET", "/teacher/home", Some(&teacher_token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], teacher.email);

    let student_token = login_student(&app, &student.student_number).await;
    let response = send(&app, empty_request("GET", "/student/home", Some(&student_token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], student.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_session_cookie_is_accepted(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let app = setup_test_app(pool);
    let token = login_teacher(&app, &teacher.email).await;

    let request = Request::builder()
        .method("GET")
        .uri("/teacher/home")
        .header(header::COOKIE, format!("gearlend_session={}", token))
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_anonymous_request_points_at_group_login(pool: SqlitePool) {
    let app = setup_test_app(pool);

    let response = send(&app, empty_request("GET", "/teacher/items", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert!(body["error"].as_str().unwrap().contains("/teacher/login"));

    let response = send(&app, empty_request("GET", "/student/loans", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("/student/login"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_token_is_treated_as_anonymous(pool: SqlitePool) {
    let app = setup_test_app(pool);

    let response = send(
        &app,
        empty_request("GET", "/student/home", Some("not-a-valid-token")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_cross_role_access_is_forbidden(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let student = create_student(&pool).await;
    let app = setup_test_app(pool);

    let student_token = login_student(&app, &student.student_number).await;
    let response = send(&app, empty_request("GET", "/teacher/items", Some(&student_token))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "forbidden");

    let teacher_token = login_teacher(&app, &teacher.email).await;
    let response = send(
        &app,
        empty_request("GET", "/student/items/available", Some(&teacher_token)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_logout_revokes_session(pool: SqlitePool) {
    let student = create_student(&pool).await;
    let app = setup_test_app(pool.clone());
    let token = login_student(&app, &student.student_number).await;

    let response = send(&app, empty_request("POST", "/student/logout", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let removal = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(removal.starts_with("gearlend_session=;"));
    assert!(removal.contains("Max-Age=0"));

    let response = send(&app, empty_request("GET", "/student/home", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let revoked: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM revoked_sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(revoked, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_cookie_logout_expires_cookie(pool: SqlitePool) {
    let teacher = create_teacher(&pool).await;
    let app = setup_test_app(pool);
    let token = login_teacher(&app, &teacher.email).await;

    let request = Request::builder()
        .method("POST")
        .uri("/teacher/logout")
        .header(header::COOKIE, format!("gearlend_session={}", token))
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let removal = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(removal.starts_with("gearlend_session=;"));
    assert!(removal.contains("Max-Age=0"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_logout_requires_session(pool: SqlitePool) {
    let app = setup_test_app(pool);

    let response = send(&app, empty_request("POST", "/teacher/logout", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_session_of_deleted_student_is_rejected(pool: SqlitePool) {
    let student = create_student(&pool).await;
    let app = setup_test_app(pool.clone());
    let token = login_student(&app, &student.student_number).await;

    sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(student.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = send(&app, empty_request("GET", "/student/home", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
