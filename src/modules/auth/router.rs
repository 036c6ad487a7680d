use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::auth::controller::{
    student_home, student_login, student_logout, teacher_home, teacher_login, teacher_logout,
};
use crate::state::AppState;

pub fn init_teacher_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(teacher_login))
        .route("/logout", post(teacher_logout))
        .route("/home", get(teacher_home))
}

pub fn init_student_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(student_login))
        .route("/logout", post(student_logout))
        .route("/home", get(student_home))
}
