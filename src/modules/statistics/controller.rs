use axum::{Json, extract::State};
use tracing::instrument;

use gearlend_core::AppError;

use crate::middleware::role::CurrentTeacher;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::statistics::model::ItemLoanReport;
use crate::modules::statistics::service::StatisticsService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/teacher/loan-statistics",
    responses(
        (status = 200, description = "Daily loan totals and a bar chart per item", body = Vec<ItemLoanReport>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Statistics"
)]
#[instrument(skip(state, _teacher))]
pub async fn get_loan_statistics(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
) -> Result<Json<Vec<ItemLoanReport>>, AppError> {
    let reports = StatisticsService::loan_reports(&state.db).await?;
    Ok(Json(reports))
}
