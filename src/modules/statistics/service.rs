//! Daily loan totals per item.
//!
//! Loans are grouped by the UTC calendar date of `loan_date`. The grouping is
//! done here rather than in SQL so the date boundary does not depend on how the
//! timestamp text is stored.

use std::collections::{BTreeMap, HashMap};

use sqlx::SqlitePool;
use tracing::instrument;

use gearlend_core::AppError;

use crate::modules::statistics::chart::chart_png_base64;
use crate::modules::statistics::model::{
    DailyLoanPoint, ItemLoanReport, ItemLoanSeries, ItemName, LoanRecord,
};

pub struct StatisticsService;

impl StatisticsService {
    /// One series per item, items without loans included with an empty series.
    #[instrument(skip(db))]
    pub async fn daily_loan_series(db: &SqlitePool) -> Result<Vec<ItemLoanSeries>, AppError> {
        let items = sqlx::query_as::<_, ItemName>("SELECT id, name FROM items")
            .fetch_all(db)
            .await?;

        let loans =
            sqlx::query_as::<_, LoanRecord>("SELECT item_id, loan_date, quantity FROM loans")
                .fetch_all(db)
                .await?;

        Ok(aggregate_daily_loans(&items, &loans))
    }

    /// Series plus a rendered bar chart for each item.
    #[instrument(skip(db))]
    pub async fn loan_reports(db: &SqlitePool) -> Result<Vec<ItemLoanReport>, AppError> {
        let series = Self::daily_loan_series(db).await?;

        series
            .into_iter()
            .map(|stats| {
                let chart_png_base64 = chart_png_base64(&stats.series)?;
                Ok(ItemLoanReport {
                    stats,
                    chart_png_base64,
                })
            })
            .collect()
    }
}

/// Sums loan quantities per item and UTC date.
///
/// Points are sorted by date ascending; items are ordered by name, then id.
/// Loans whose item is not in `items` are ignored.
pub fn aggregate_daily_loans(items: &[ItemName], loans: &[LoanRecord]) -> Vec<ItemLoanSeries> {
    let mut per_item: HashMap<i64, BTreeMap<_, i64>> = HashMap::new();
    for loan in loans {
        *per_item
            .entry(loan.item_id)
            .or_default()
            .entry(loan.loan_date.date_naive())
            .or_insert(0) += loan.quantity;
    }

    let mut result: Vec<ItemLoanSeries> = items
        .iter()
        .map(|item| {
            let series = per_item
                .remove(&item.id)
                .unwrap_or_default()
                .into_iter()
                .map(|(date, total)| DailyLoanPoint { date, total })
                .collect();

            ItemLoanSeries {
                item_id: item.id,
                item_name: item.name.clone(),
                series,
            }
        })
        .collect();

    result.sort_by(|a, b| {
        a.item_name
            .cmp(&b.item_name)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn item(id: i64, name: &str) -> ItemName {
        ItemName {
            id,
            name: name.to_string(),
        }
    }

    fn loan(item_id: i64, day: u32, hour: u32, quantity: i64) -> LoanRecord {
        LoanRecord {
            item_id,
            loan_date: Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap(),
            quantity,
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_same_day_loans_are_summed() {
        let result = aggregate_daily_loans(
            &[item(1, "Projector")],
            &[loan(1, 3, 9, 2), loan(1, 3, 17, 3)],
        );

        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0].series,
            vec![DailyLoanPoint {
                date: date(3),
                total: 5
            }]
        );
    }

    #[test]
    fn test_series_sorted_by_date() {
        let result = aggregate_daily_loans(
            &[item(1, "Cable")],
            &[loan(1, 5, 10, 1), loan(1, 2, 23, 4)],
        );

        let dates: Vec<_> = result[0].series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date(2), date(5)]);
        assert_eq!(result[0].series[0].total, 4);
    }

    #[test]
    fn test_items_without_loans_have_empty_series() {
        let result = aggregate_daily_loans(
            &[item(2, "Tripod"), item(1, "Cable")],
            &[loan(1, 1, 8, 1)],
        );

        assert_eq!(result[0].item_name, "Cable");
        assert_eq!(result[1].item_name, "Tripod");
        assert!(result[1].series.is_empty());
    }

    #[test]
    fn test_duplicate_names_ordered_by_id() {
        let result = aggregate_daily_loans(&[item(7, "Cable"), item(3, "Cable")], &[]);
        let ids: Vec<_> = result.iter().map(|s| s.item_id).collect();
        assert_eq!(ids, vec![3, 7]);
    }
}
