use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use gearlend_core::AppError;

use crate::middleware::role::{CurrentStudent, CurrentTeacher};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::loans::model::{
    GrantLoanDto, Loan, LoanDetails, ReturnLoansDto, ReturnOutcome, StudentLoanStatus,
};
use crate::modules::loans::service::LoanService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/student/loans",
    request_body = GrantLoanDto,
    responses(
        (status = 201, description = "Loan granted", body = Loan),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Student role required", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 409, description = "Insufficient stock or item unavailable", body = ErrorResponse),
        (status = 422, description = "Quantity must be at least 1", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Loans"
)]
#[instrument(skip(state, student), fields(student_id = student.id))]
pub async fn grant_loan(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
    ValidatedJson(dto): ValidatedJson<GrantLoanDto>,
) -> Result<(StatusCode, Json<Loan>), AppError> {
    let loan = LoanService::grant_loan(&state.db, student.id, dto.item_id, dto.quantity).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

#[utoipa::path(
    get,
    path = "/student/loans",
    responses(
        (status = 200, description = "Open loans, newest first", body = Vec<LoanDetails>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Student role required", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Loans"
)]
#[instrument(skip(state, student), fields(student_id = student.id))]
pub async fn get_open_loans(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
) -> Result<Json<Vec<LoanDetails>>, AppError> {
    let loans = LoanService::list_open_loans(&state.db, student.id).await?;
    Ok(Json(loans))
}

#[utoipa::path(
    get,
    path = "/student/loans/history",
    responses(
        (status = 200, description = "All loans of the student, newest first", body = Vec<LoanDetails>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Student role required", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Loans"
)]
#[instrument(skip(state, student), fields(student_id = student.id))]
pub async fn get_loan_history(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
) -> Result<Json<Vec<LoanDetails>>, AppError> {
    let loans = LoanService::list_loan_history(&state.db, student.id).await?;
    Ok(Json(loans))
}

#[utoipa::path(
    post,
    path = "/student/returns",
    request_body = ReturnLoansDto,
    responses(
        (status = 200, description = "One outcome per distinct loan id", body = Vec<ReturnOutcome>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Student role required", body = ErrorResponse),
        (status = 422, description = "No loan ids given", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Loans"
)]
#[instrument(skip(state, student), fields(student_id = student.id))]
pub async fn return_loans(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
    ValidatedJson(dto): ValidatedJson<ReturnLoansDto>,
) -> Result<Json<Vec<ReturnOutcome>>, AppError> {
    let outcomes = LoanService::return_loans(&state.db, student.id, &dto.loan_ids).await?;
    Ok(Json(outcomes))
}

#[utoipa::path(
    get,
    path = "/teacher/loan-status",
    responses(
        (status = 200, description = "Every student with open and closed loans", body = Vec<StudentLoanStatus>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Loans"
)]
#[instrument(skip(state, _teacher))]
pub async fn get_loan_status(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
) -> Result<Json<Vec<StudentLoanStatus>>, AppError> {
    let status = LoanService::fleet_status(&state.db).await?;
    Ok(Json(status))
}
