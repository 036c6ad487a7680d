use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::loans::controller::{
    get_loan_history, get_loan_status, get_open_loans, grant_loan, return_loans,
};
use crate::state::AppState;

/// Student loan routes: `/loans`, `/loans/history` and `/returns`.
pub fn init_loans_router() -> Router<AppState> {
    Router::new()
        .route("/loans", post(grant_loan).get(get_open_loans))
        .route("/loans/history", get(get_loan_history))
        .route("/returns", post(return_loans))
}

pub fn init_loan_status_router() -> Router<AppState> {
    Router::new().route("/loan-status", get(get_loan_status))
}
