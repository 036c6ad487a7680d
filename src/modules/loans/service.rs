//! Grant and return of loans.
//!
//! Every stock mutation runs in one transaction together with the loan row it
//! belongs to. A grant is an atomic conditional decrement followed by the
//! insert; a return closes the loan (only if it is still open) and puts the
//! units back. An uncommitted transaction rolls back when dropped, so every
//! early return leaves the database untouched.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::instrument;

use gearlend_core::{AppError, DomainError, LoanDenial};
use gearlend_models::Student;

use crate::metrics::{track_loan_denied, track_loan_granted, track_loans_returned};
use crate::modules::loans::model::{Loan, LoanDetails, ReturnOutcome, StudentLoanStatus};

const LOAN_COLUMNS: &str = "id, item_id, student_id, loan_date, return_date, quantity";

const LOAN_DETAILS_SELECT: &str = r#"
    SELECT l.id, l.item_id, i.name AS item_name, l.student_id,
           l.loan_date, l.return_date, l.quantity
    FROM loans l
    JOIN items i ON i.id = l.item_id
"#;

pub struct LoanService;

impl LoanService {
    #[instrument(skip(db))]
    pub async fn grant_loan(
        db: &SqlitePool,
        student_id: i64,
        item_id: i64,
        quantity: i64,
    ) -> Result<Loan, AppError> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity", "Quantity must be at least 1").into());
        }

        let now = Utc::now();
        let mut tx = db.begin().await?;

        let decremented = sqlx::query(
            r#"
            UPDATE items
            SET quantity = quantity - ?, updated_at = ?
            WHERE id = ? AND available AND quantity >= ?
            "#,
        )
        .bind(quantity)
        .bind(now)
        .bind(item_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            let denial = Self::denial_reason(&mut tx, item_id, quantity).await?;
            tracing::info!(reason = denial.code(), "loan denied");
            track_loan_denied(denial.code());
            return Err(denial.into());
        }

        let loan = sqlx::query_as::<_, Loan>(&format!(
            r#"
            INSERT INTO loans (item_id, student_id, loan_date, return_date, quantity)
            VALUES (?, ?, ?, NULL, ?)
            RETURNING {LOAN_COLUMNS}
            "#
        ))
        .bind(item_id)
        .bind(student_id)
        .bind(now)
        .bind(quantity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(loan_id = loan.id, "loan granted");
        track_loan_granted(quantity);
        Ok(loan)
    }

    /// Why the conditional decrement matched no row, read inside the same
    /// transaction.
    async fn denial_reason(
        tx: &mut Transaction<'_, Sqlite>,
        item_id: i64,
        requested: i64,
    ) -> Result<LoanDenial, AppError> {
        let row: Option<(bool, i64)> =
            sqlx::query_as("SELECT available, quantity FROM items WHERE id = ?")
                .bind(item_id)
                .fetch_optional(&mut **tx)
                .await?;

        Ok(match row {
            None => LoanDenial::ItemNotFound { item_id },
            Some((false, _)) => LoanDenial::ItemUnavailable { item_id },
            Some((true, available)) => LoanDenial::InsufficientStock {
                requested,
                available,
            },
        })
    }

    /// Returns each loan in its own transaction, in request order.
    ///
    /// Repeated ids are handled once. Loans that are not the student's (or do
    /// not exist) come back as `Skipped` without touching anything.
    #[instrument(skip(db))]
    pub async fn return_loans(
        db: &SqlitePool,
        student_id: i64,
        loan_ids: &[i64],
    ) -> Result<Vec<ReturnOutcome>, AppError> {
        let ids = dedupe_ids(loan_ids);
        let mut outcomes = Vec::with_capacity(ids.len());

        for loan_id in ids {
            outcomes.push(Self::return_loan(db, student_id, loan_id).await?);
        }

        let returned = outcomes
            .iter()
            .filter(|o| matches!(o, ReturnOutcome::Returned { .. }))
            .count();
        track_loans_returned(returned);

        Ok(outcomes)
    }

    async fn return_loan(
        db: &SqlitePool,
        student_id: i64,
        loan_id: i64,
    ) -> Result<ReturnOutcome, AppError> {
        let now = Utc::now();
        let mut tx = db.begin().await?;

        let closed = sqlx::query_as::<_, Loan>(&format!(
            r#"
            UPDATE loans
            SET return_date = ?
            WHERE id = ? AND student_id = ? AND return_date IS NULL
            RETURNING {LOAN_COLUMNS}
            "#
        ))
        .bind(now)
        .bind(loan_id)
        .bind(student_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(loan) = closed else {
            let owned: Option<(i64,)> =
                sqlx::query_as("SELECT id FROM loans WHERE id = ? AND student_id = ?")
                    .bind(loan_id)
                    .bind(student_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            return Ok(match owned {
                Some(_) => ReturnOutcome::AlreadyReturned { loan_id },
                None => {
                    tracing::debug!(loan_id, "return skipped, loan not owned by student");
                    ReturnOutcome::Skipped { loan_id }
                }
            });
        };

        sqlx::query("UPDATE items SET quantity = quantity + ?, updated_at = ? WHERE id = ?")
            .bind(loan.quantity)
            .bind(now)
            .bind(loan.item_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(loan_id, item_id = loan.item_id, "loan returned");
        Ok(ReturnOutcome::Returned { loan })
    }

    /// Open loans of a student, newest first.
    #[instrument(skip(db))]
    pub async fn list_open_loans(
        db: &SqlitePool,
        student_id: i64,
    ) -> Result<Vec<LoanDetails>, AppError> {
        let loans = sqlx::query_as::<_, LoanDetails>(&format!(
            "{LOAN_DETAILS_SELECT} WHERE l.student_id = ? AND l.return_date IS NULL ORDER BY l.loan_date DESC, l.id DESC"
        ))
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(loans)
    }

    /// Every loan of a student, open and closed, newest first.
    #[instrument(skip(db))]
    pub async fn list_loan_history(
        db: &SqlitePool,
        student_id: i64,
    ) -> Result<Vec<LoanDetails>, AppError> {
        let loans = sqlx::query_as::<_, LoanDetails>(&format!(
            "{LOAN_DETAILS_SELECT} WHERE l.student_id = ? ORDER BY l.loan_date DESC, l.id DESC"
        ))
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(loans)
    }

    /// Loan status of every student, for the teacher overview.
    #[instrument(skip(db))]
    pub async fn fleet_status(db: &SqlitePool) -> Result<Vec<StudentLoanStatus>, AppError> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, name, email, student_number, created_at, updated_at FROM students ORDER BY id",
        )
        .fetch_all(db)
        .await?;

        let loans = sqlx::query_as::<_, LoanDetails>(LOAN_DETAILS_SELECT)
            .fetch_all(db)
            .await?;

        Ok(build_fleet_status(students, loans))
    }
}

/// Drops repeated ids, keeping the first occurrence order.
pub fn dedupe_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Splits loans into open (newest loan first) and closed (latest return first).
pub fn partition_loans(loans: Vec<LoanDetails>) -> (Vec<LoanDetails>, Vec<LoanDetails>) {
    let (mut open, mut closed): (Vec<_>, Vec<_>) =
        loans.into_iter().partition(|loan| loan.return_date.is_none());

    open.sort_by(|a, b| b.loan_date.cmp(&a.loan_date).then(b.id.cmp(&a.id)));
    closed.sort_by(|a, b| b.return_date.cmp(&a.return_date).then(b.id.cmp(&a.id)));

    (open, closed)
}

/// Pairs every student (in the given order) with their open and closed loans.
pub fn build_fleet_status(
    students: Vec<Student>,
    loans: Vec<LoanDetails>,
) -> Vec<StudentLoanStatus> {
    let mut by_student: HashMap<i64, Vec<LoanDetails>> = HashMap::new();
    for loan in loans {
        by_student.entry(loan.student_id).or_default().push(loan);
    }

    students
        .into_iter()
        .map(|student| {
            let (open_loans, closed_loans) =
                partition_loans(by_student.remove(&student.id).unwrap_or_default());
            StudentLoanStatus {
                student,
                open_loans,
                closed_loans,
            }
        })
        .collect()
}
