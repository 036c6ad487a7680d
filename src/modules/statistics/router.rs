use axum::{Router, routing::get};

use crate::modules::statistics::controller::get_loan_statistics;
use crate::state::AppState;

pub fn init_statistics_router() -> Router<AppState> {
    Router::new().route("/loan-statistics", get(get_loan_statistics))
}
