//! # Metrics Summary
//!
//! Headline numbers for the selected range.
//!
//! ```text
//! total_revenue = Σ filtered.total
//! sales_count   = |filtered|
//! average_sale  = total_revenue / sales_count   (0 when no sales)
//! growth_rate   = (current - previous) / previous × 100
//!                 current  = [now - 30d, ∞)
//!                 previous = [now - 60d, now - 30d)
//!                 only for the 30-day range; 0 otherwise or when previous = 0
//! ```

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::range::{RangeWindow, TimeRange};
use crate::money::Money;
use crate::types::Sale;

/// Summary figures for one range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesMetrics {
    pub total_revenue: Money,
    pub sales_count: u64,
    pub average_sale: Money,
    /// Percent change against the previous 30 days.
    pub growth_rate: f64,
}

impl SalesMetrics {
    /// Metrics for an empty range.
    pub fn empty() -> Self {
        SalesMetrics {
            total_revenue: Money::zero(),
            sales_count: 0,
            average_sale: Money::zero(),
            growth_rate: 0.0,
        }
    }
}

/// Computes the summary from the range-filtered sales.
///
/// `all` is the unfiltered collection; only the growth rate reads it.
pub fn compute_metrics(
    filtered: &[&Sale],
    all: &[Sale],
    range: TimeRange,
    now: DateTime<FixedOffset>,
) -> SalesMetrics {
    let total_revenue: Money = filtered.iter().map(|sale| sale.total).sum();
    let sales_count = filtered.len() as u64;
    let average_sale = total_revenue.div_round(sales_count).unwrap_or_default();

    let growth_rate = match range {
        TimeRange::Last30Days => {
            let previous = previous_period_revenue(all, now);
            growth_percent(total_revenue, previous)
        }
        _ => 0.0,
    };

    SalesMetrics {
        total_revenue,
        sales_count,
        average_sale,
        growth_rate,
    }
}

/// Revenue over `[now - 60d, now - 30d)`.
fn previous_period_revenue(all: &[Sale], now: DateTime<FixedOffset>) -> Money {
    let window = RangeWindow {
        start: (now - Duration::days(60)).with_timezone(&Utc),
        end: Some((now - Duration::days(30)).with_timezone(&Utc)),
    };

    all.iter()
        .filter(|sale| sale.date.map_or(false, |date| window.contains(date)))
        .map(|sale| sale.total)
        .sum()
}

/// Percent change from `previous` to `current`; 0 when `previous` is 0.
pub fn growth_percent(current: Money, previous: Money) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    (current.as_f64() - previous.as_f64()) / previous.as_f64() * 100.0
}
