//! Loan ledger and the grant/return DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::students::Student;

/// A loan row. Open while `return_date` is null.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i64,
    pub item_id: i64,
    pub student_id: i64,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub quantity: i64,
}

/// Loan joined with the name of the borrowed item.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct LoanDetails {
    pub id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub student_id: i64,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct GrantLoanDto {
    pub item_id: i64,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 1)]
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ReturnLoansDto {
    #[validate(length(min = 1, message = "Select at least one loan to return"))]
    pub loan_ids: Vec<i64>,
}

/// Result of returning one loan.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReturnOutcome {
    Returned { loan: Loan },
    /// The loan belongs to the student but was closed earlier.
    AlreadyReturned { loan_id: i64 },
    /// Not a loan of this student (or no such loan).
    Skipped { loan_id: i64 },
}

/// One row of the teacher's loan status overview.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentLoanStatus {
    pub student: Student,
    pub open_loans: Vec<LoanDetails>,
    pub closed_loans: Vec<LoanDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_loan_dto_quantity_must_be_positive() {
        let dto = GrantLoanDto {
            item_id: 1,
            quantity: 0,
        };
        assert!(dto.validate().is_err());

        let dto = GrantLoanDto {
            item_id: 1,
            quantity: -3,
        };
        assert!(dto.validate().is_err());

        let dto = GrantLoanDto {
            item_id: 1,
            quantity: 2,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_return_loans_dto_requires_ids() {
        let dto = ReturnLoansDto { loan_ids: vec![] };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_return_outcome_is_tagged() {
        let json = serde_json::to_value(ReturnOutcome::Skipped { loan_id: 9 }).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["loan_id"], 9);

        let json = serde_json::to_value(ReturnOutcome::AlreadyReturned { loan_id: 4 }).unwrap();
        assert_eq!(json["status"], "already_returned");
    }
}
