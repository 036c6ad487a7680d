use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::auth::request_context_middleware;
use crate::middleware::role::RouteGroup;
use crate::modules::auth::router::{init_student_auth_router, init_teacher_auth_router};
use crate::modules::items::router::{init_available_items_router, init_items_router};
use crate::modules::loans::router::{init_loan_status_router, init_loans_router};
use crate::modules::statistics::router::init_statistics_router;
use crate::modules::students::router::init_students_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::{Extension, Router, middleware};
use gearlend_auth::Role;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

/// Room left in a request body for multipart framing and the text fields.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Routes served to teachers under `/teacher`.
fn teacher_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(init_teacher_auth_router())
        .nest("/teachers", init_teachers_router())
        .nest("/students", init_students_router())
        .nest("/items", init_items_router())
        .merge(init_loan_status_router())
        .merge(init_statistics_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_context_middleware,
        ))
        .layer(Extension(RouteGroup(Role::Teacher)))
}

/// Routes served to students under `/student`.
fn student_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(init_student_auth_router())
        .nest("/items", init_available_items_router())
        .merge(init_loans_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_context_middleware,
        ))
        .layer(Extension(RouteGroup(Role::Student)))
}

pub fn init_router(state: AppState) -> Router {
    let body_limit = state.storage_config.max_file_size + MULTIPART_OVERHEAD;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/teacher", teacher_routes(&state))
        .nest("/student", student_routes(&state))
        .nest_service(
            "/static/images",
            ServeDir::new(state.storage_config.upload_dir.clone()),
        )
        .with_state(state.clone())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
