//! The full analytics view for one range, built in a single call.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::customers::{rank_customers, CustomerSpend, TOP_CUSTOMERS};
use super::daily::{daily_series, DailyBucket};
use super::metrics::{compute_metrics, SalesMetrics};
use super::payments::{payment_distribution, PaymentMethodShare};
use super::products::{rank_products, ProductSales, TOP_PRODUCTS};
use super::range::{filter_sales, TimeRange};
use crate::types::Sale;

/// Everything the analytics screen shows for one range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub metrics: SalesMetrics,
    /// Fixed 30-day series over all sales, independent of `range`.
    pub daily_sales: Vec<DailyBucket>,
    pub top_products: Vec<ProductSales>,
    pub payment_methods: Vec<PaymentMethodShare>,
    pub top_customers: Vec<CustomerSpend>,
}

impl AnalyticsReport {
    /// Runs every analytics pass over `all_sales`.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{FixedOffset, TimeZone};
    /// use salestrack_core::analytics::{AnalyticsReport, TimeRange};
    ///
    /// let now = FixedOffset::east_opt(3600).unwrap()
    ///     .with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
    /// let report = AnalyticsReport::build(&[], TimeRange::from_token("bogus"), now);
    /// assert_eq!(report.range, TimeRange::Last30Days);
    /// assert_eq!(report.daily_sales.len(), 30);
    /// assert!(report.top_products.is_empty());
    /// ```
    pub fn build(all_sales: &[Sale], range: TimeRange, now: DateTime<FixedOffset>) -> Self {
        let filtered = filter_sales(all_sales, range, now);

        AnalyticsReport {
            range,
            metrics: compute_metrics(&filtered, all_sales, range, now),
            daily_sales: daily_series(all_sales, now),
            top_products: rank_products(filtered.iter().copied(), TOP_PRODUCTS),
            payment_methods: payment_distribution(filtered.iter().copied()),
            top_customers: rank_customers(filtered.iter().copied(), TOP_CUSTOMERS),
        }
    }
}
