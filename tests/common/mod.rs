#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use chrono::{DateTime, Utc};
use gearlend::gearlend_config::{CorsConfig, SessionConfig, StorageConfig};
use gearlend::gearlend_core::hash_password;
use gearlend::router::init_router;
use gearlend::state::AppState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestTeacher {
    pub id: i64,
    pub email: String,
}

pub struct TestStudent {
    pub id: i64,
    pub student_number: String,
}

pub fn test_state(pool: SqlitePool) -> AppState {
    let upload_dir: PathBuf = std::env::temp_dir().join(format!("gearlend-test-{}", Uuid::new_v4()));
    AppState::new(
        pool,
        SessionConfig::with_secret("integration-test-secret"),
        CorsConfig::from_list("http://localhost:5173"),
        StorageConfig {
            upload_dir,
            public_base_url: "/static/images".to_string(),
            max_file_size: 1024 * 1024,
        },
    )
}

pub fn setup_test_app(pool: SqlitePool) -> axum::Router {
    init_router(test_state(pool))
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Student numbers are at most seven characters.
pub fn generate_student_number() -> String {
    Uuid::new_v4().simple().to_string()[..7].to_string()
}

pub async fn create_teacher(pool: &SqlitePool) -> TestTeacher {
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD).unwrap();
    let now = Utc::now();

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO teachers (name, email, password_hash, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind("Test Teacher")
    .bind(&email)
    .bind(&hashed)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .unwrap();

    TestTeacher { id, email }
}

pub async fn create_student(pool: &SqlitePool) -> TestStudent {
    let student_number = generate_student_number();
    let now = Utc::now();

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO students (name, email, student_number, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind("Test Student")
    .bind(generate_unique_email())
    .bind(&student_number)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .unwrap();

    TestStudent { id, student_number }
}

pub async fn create_item(
    pool: &SqlitePool,
    teacher_id: i64,
    name: &str,
    quantity: i64,
    available: bool,
) -> i64 {
    let now = Utc::now();
    sqlx::query_scalar(
        r#"
        INSERT INTO items (name, image, quantity, available, teacher_id, created_at, updated_at)
        VALUES (?, NULL, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(quantity)
    .bind(available)
    .bind(teacher_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a loan row directly, without touching stock.
pub async fn insert_loan(
    pool: &SqlitePool,
    item_id: i64,
    student_id: i64,
    loan_date: DateTime<Utc>,
    quantity: i64,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO loans (item_id, student_id, loan_date, return_date, quantity)
        VALUES (?, ?, ?, NULL, ?)
        RETURNING id
        "#,
    )
    .bind(item_id)
    .bind(student_id)
    .bind(loan_date)
    .bind(quantity)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn item_quantity(pool: &SqlitePool, item_id: i64) -> i64 {
    sqlx::query_scalar("SELECT quantity FROM items WHERE id = ?")
        .bind(item_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_loans(pool: &SqlitePool, item_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE item_id = ?")
        .bind(item_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn send(app: &axum::Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn login_teacher(app: &axum::Router, email: &str) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/teacher/login",
            None,
            json!({ "email": email, "password": TEST_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["session_token"]
        .as_str()
        .unwrap()
        .to_string()
}

pub async fn login_student(app: &axum::Router, student_number: &str) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/student/login",
            None,
            json!({ "student_number": student_number }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["session_token"]
        .as_str()
        .unwrap()
        .to_string()
}

pub const MULTIPART_BOUNDARY: &str = "gearlend-test-boundary";

/// Builds a multipart form from text fields and an optional `(filename, bytes)` image part.
pub fn multipart_request(
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    image: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                MULTIPART_BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content)) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                MULTIPART_BOUNDARY, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .unwrap()
}
