use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub use gearlend_models::statistics::*;

/// The columns of a loan the aggregation needs.
#[derive(Debug, Clone, FromRow)]
pub struct LoanRecord {
    pub item_id: i64,
    pub loan_date: DateTime<Utc>,
    pub quantity: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct ItemName {
    pub id: i64,
    pub name: String,
}
