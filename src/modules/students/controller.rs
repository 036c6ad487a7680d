use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use gearlend_core::AppError;

use crate::middleware::role::CurrentTeacher;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::students::model::{CreateStudentDto, Student, UpdateStudentDto};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/teacher/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 409, description = "Email or student number already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, teacher, dto), fields(teacher_id = teacher.id))]
pub async fn create_student(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create_student(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/teacher/students",
    responses(
        (status = 200, description = "All students", body = Vec<Student>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _teacher))]
pub async fn get_students(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::list_students(&state.db).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/teacher/students/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _teacher))]
pub async fn get_student(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/teacher/students/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Email or student number already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _teacher, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/teacher/students/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Student has loan records", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_student(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    StudentService::delete_student(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
