use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::DateTime;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use gearlend_auth::{Role, create_session_token};
use gearlend_core::AppError;
use gearlend_models::{Student, Teacher};

use crate::metrics::{track_login_failure, track_login_success};
use crate::middleware::role::{CurrentSession, CurrentStudent, CurrentTeacher};
use crate::modules::auth::model::{
    LoginResponse, MessageResponse, Principal, StudentLoginRequest, TeacherLoginRequest,
};
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((state.session_config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.session_config.secure_cookie)
        .build()
}

/// An expired session cookie, sent whether or not the request carried one.
fn removal_cookie(state: &AppState) -> Cookie<'static> {
    let mut cookie = Cookie::build((state.session_config.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.session_config.secure_cookie)
        .build();
    cookie.make_removal();
    cookie
}

/// Issues a session for `principal` and sets it as the session cookie.
fn start_session(
    state: &AppState,
    jar: CookieJar,
    principal: Principal,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let role = principal.role();
    let token = create_session_token(principal.id(), role, &state.session_config)?;
    let jar = jar.add(session_cookie(state, token.clone()));

    track_login_success(role);

    Ok((
        jar,
        Json(LoginResponse {
            session_token: token,
            role,
            principal,
        }),
    ))
}

async fn end_session(
    state: &AppState,
    jar: CookieJar,
    session: CurrentSession,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    let claims = session.0;
    let expires_at = DateTime::from_timestamp(claims.exp as i64, 0).unwrap_or_default();
    AuthService::revoke_session(&state.db, &claims.jti, expires_at).await?;

    Ok((
        jar.add(removal_cookie(state)),
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/teacher/login",
    request_body = TeacherLoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = LoginResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto), fields(email = %dto.email))]
pub async fn teacher_login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<TeacherLoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let teacher = AuthService::authenticate_teacher(&state.db, &dto.email, &dto.password)
        .await
        .inspect_err(|_| track_login_failure(Role::Teacher))?;

    start_session(&state, jar, Principal::Teacher(teacher))
}

#[utoipa::path(
    post,
    path = "/student/login",
    request_body = StudentLoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = LoginResponse),
        (status = 401, description = "Unknown student number", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn student_login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<StudentLoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let student = AuthService::authenticate_student(&state.db, &dto.student_number)
        .await
        .inspect_err(|_| track_login_failure(Role::Student))?;

    start_session(&state, jar, Principal::Student(student))
}

#[utoipa::path(
    post,
    path = "/teacher/logout",
    responses(
        (status = 200, description = "Session revoked and cookie removed", body = MessageResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Not a teacher session", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, session))]
pub async fn teacher_logout(
    State(state): State<AppState>,
    jar: CookieJar,
    CurrentTeacher(teacher): CurrentTeacher,
    session: CurrentSession,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    tracing::info!(teacher_id = teacher.id, "teacher logged out");
    end_session(&state, jar, session).await
}

#[utoipa::path(
    post,
    path = "/student/logout",
    responses(
        (status = 200, description = "Session revoked and cookie removed", body = MessageResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Not a student session", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, session))]
pub async fn student_logout(
    State(state): State<AppState>,
    jar: CookieJar,
    CurrentStudent(student): CurrentStudent,
    session: CurrentSession,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    tracing::info!(student_id = student.id, "student logged out");
    end_session(&state, jar, session).await
}

#[utoipa::path(
    get,
    path = "/teacher/home",
    responses(
        (status = 200, description = "Current teacher", body = Teacher),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Not a teacher session", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn teacher_home(CurrentTeacher(teacher): CurrentTeacher) -> Json<Teacher> {
    Json(teacher)
}

#[utoipa::path(
    get,
    path = "/student/home",
    responses(
        (status = 200, description = "Current student", body = Student),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Not a student session", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn student_home(CurrentStudent(student): CurrentStudent) -> Json<Student> {
    Json(student)
}
