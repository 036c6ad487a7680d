use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::teachers::controller::{
    delete_teacher, get_teacher, get_teachers, register_teacher, update_teacher,
};
use crate::state::AppState;

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_teacher).get(get_teachers))
        .route(
            "/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
}
