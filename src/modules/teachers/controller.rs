use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use gearlend_core::AppError;

use crate::middleware::role::CurrentTeacher;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::teachers::model::{CreateTeacherDto, Teacher, UpdateTeacherDto};
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/teacher/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher registered", body = Teacher),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn register_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    let teacher = TeacherService::register_teacher(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

#[utoipa::path(
    get,
    path = "/teacher/teachers",
    responses(
        (status = 200, description = "All teachers", body = Vec<Teacher>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, _teacher))]
pub async fn get_teachers(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
) -> Result<Json<Vec<Teacher>>, AppError> {
    let teachers = TeacherService::list_teachers(&state.db).await?;
    Ok(Json(teachers))
}

#[utoipa::path(
    get,
    path = "/teacher/teachers/{id}",
    params(("id" = i64, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, _teacher))]
pub async fn get_teacher(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<i64>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::get_teacher(&state.db, id).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    put,
    path = "/teacher/teachers/{id}",
    params(("id" = i64, Path, description = "Teacher ID")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = Teacher),
        (status = 403, description = "Teachers can only edit their own account", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, current, dto))]
pub async fn update_teacher(
    State(state): State<AppState>,
    CurrentTeacher(current): CurrentTeacher,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<Teacher>, AppError> {
    if current.id != id {
        return Err(AppError::forbidden(
            "Teachers can only edit their own account".to_string(),
        ));
    }

    let teacher = TeacherService::update_teacher(&state.db, id, dto).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    delete,
    path = "/teacher/teachers/{id}",
    params(("id" = i64, Path, description = "Teacher ID")),
    responses(
        (status = 204, description = "Teacher deleted"),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 409, description = "Teacher still owns items", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    TeacherService::delete_teacher(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
