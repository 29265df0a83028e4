//! # Daily Revenue Series
//!
//! Thirty calendar-day buckets ending today, oldest first.
//!
//! ```text
//! now = Oct 16 ──► [Sep 17] [Sep 18] ... [Oct 15] [Oct 16]
//!                      0        1            28       29
//! ```
//!
//! The window is fixed; the selected time range never changes it. A sale
//! lands in the bucket whose calendar date (in now's offset) equals the
//! sale's local date. Sales outside the window, or without a date, are
//! dropped.

use chrono::{DateTime, Days, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Sale;

/// Number of buckets in the series.
pub const DAILY_WINDOW_DAYS: usize = 30;

/// Revenue and order count for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Short display label such as `Oct 16`.
    pub label: String,
    pub revenue: Money,
    pub orders: u32,
}

impl DailyBucket {
    fn empty(date: NaiveDate) -> Self {
        DailyBucket {
            date,
            label: date.format("%b %d").to_string(),
            revenue: Money::zero(),
            orders: 0,
        }
    }
}

/// Builds the fixed 30-day series from `sales`.
///
/// Pass the unfiltered collection; the window is always the trailing
/// thirty days ending on now's calendar day.
///
/// ## Example
/// ```rust
/// use chrono::{FixedOffset, TimeZone};
/// use salestrack_core::analytics::daily_series;
///
/// let now = FixedOffset::east_opt(3600).unwrap()
///     .with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
/// let series = daily_series(&[], now);
/// assert_eq!(series.len(), 30);
/// assert_eq!(series[29].label, "Oct 16");
/// ```
pub fn daily_series<'a, I>(sales: I, now: DateTime<FixedOffset>) -> Vec<DailyBucket>
where
    I: IntoIterator<Item = &'a Sale>,
{
    let today = now.date_naive();
    let first = today - Days::new(DAILY_WINDOW_DAYS as u64 - 1);

    let mut buckets: Vec<DailyBucket> = first
        .iter_days()
        .take(DAILY_WINDOW_DAYS)
        .map(DailyBucket::empty)
        .collect();

    for sale in sales {
        let Some(date) = sale.date else { continue };
        let local_day = date.with_timezone(now.offset()).date_naive();
        let offset = (local_day - first).num_days();
        if !(0..DAILY_WINDOW_DAYS as i64).contains(&offset) {
            continue;
        }

        let bucket = &mut buckets[offset as usize];
        bucket.revenue += sale.total;
        bucket.orders += 1;
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{days_ago, now, sale};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_empty_input_yields_thirty_zero_buckets() {
        let series = daily_series(&[], now());

        assert_eq!(series.len(), DAILY_WINDOW_DAYS);
        assert!(series.iter().all(|b| b.revenue.is_zero() && b.orders == 0));
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2026, 9, 17).unwrap());
        assert_eq!(series[0].label, "Sep 17");
        assert_eq!(series[29].date, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    }

    #[test]
    fn test_sales_accumulate_into_their_day() {
        let sales = vec![
            sale("a", Some(days_ago(0)), 1_000),
            sale("b", Some(days_ago(0)), 2_500),
            sale("c", Some(days_ago(29)), 700),
        ];
        let series = daily_series(&sales, now());

        assert_eq!(series[29].revenue.cents(), 3_500);
        assert_eq!(series[29].orders, 2);
        assert_eq!(series[0].revenue.cents(), 700);
        assert_eq!(series[0].orders, 1);
    }

    #[test]
    fn test_out_of_window_and_undated_sales_are_dropped() {
        let sales = vec![
            sale("old", Some(days_ago(30)), 1_000),
            sale("future", Some(days_ago(-1)), 1_000),
            sale("undated", None, 1_000),
        ];
        let series = daily_series(&sales, now());
        assert!(series.iter().all(|b| b.orders == 0));
    }

    #[test]
    fn test_same_label_last_year_does_not_match() {
        let last_year = Utc.with_ymd_and_hms(2025, 10, 16, 12, 0, 0).unwrap();
        let series = daily_series(&[sale("old", Some(last_year), 1_000)], now());
        assert_eq!(series[29].label, "Oct 16");
        assert_eq!(series[29].orders, 0);
    }

    #[test]
    fn test_day_boundary_uses_local_offset() {
        // 23:30 UTC on Oct 15 is 00:30 on Oct 16 at +01:00
        let late = Utc.with_ymd_and_hms(2026, 10, 15, 23, 30, 0).unwrap();
        let series = daily_series(&[sale("late", Some(late), 900)], now());
        assert_eq!(series[29].orders, 1);
        assert_eq!(series[28].orders, 0);

        let earlier = late - Duration::hours(1);
        let series = daily_series(&[sale("earlier", Some(earlier), 900)], now());
        assert_eq!(series[28].orders, 1);
    }
}
