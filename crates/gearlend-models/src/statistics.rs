use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

/// Total quantity lent on one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailyLoanPoint {
    #[schema(value_type = String, example = "2024-06-01")]
    pub date: NaiveDate,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ItemLoanSeries {
    pub item_id: i64,
    pub item_name: String,
    /// Ascending by date
    pub series: Vec<DailyLoanPoint>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemLoanReport {
    #[serde(flatten)]
    pub stats: ItemLoanSeries,
    /// PNG bar chart of the series, base64 encoded
    pub chart_png_base64: String,
}
