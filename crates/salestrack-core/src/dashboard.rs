//! # Dashboard Summary
//!
//! The all-time headline cards and the recent-sales list.
//!
//! Unlike the analytics report, nothing here is range-filtered: every sale
//! in the snapshot counts.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Sale;

/// Number of sales in the dashboard's recent list.
pub const RECENT_SALES_LIMIT: usize = 5;

/// All-time totals shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: Money,
    pub sales_count: u64,
    pub average_sale: Money,
    pub customers_count: u64,
    pub products_count: u64,
}

impl DashboardSummary {
    /// Summarizes a snapshot.
    ///
    /// Customer and product counts come from the store rather than from the
    /// sales, since records with no sales still count.
    pub fn from_snapshot(sales: &[Sale], customers_count: u64, products_count: u64) -> Self {
        let total_revenue: Money = sales.iter().map(|sale| sale.total).sum();
        let sales_count = sales.len() as u64;

        DashboardSummary {
            total_revenue,
            sales_count,
            average_sale: total_revenue.div_round(sales_count).unwrap_or_default(),
            customers_count,
            products_count,
        }
    }
}

/// The `limit` newest sales, newest first. Undated sales sort last.
pub fn recent_sales(sales: &[Sale], limit: usize) -> Vec<&Sale> {
    let mut ordered: Vec<&Sale> = sales.iter().collect();
    // None < Some, so reversing puts undated sales at the end
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    ordered.truncate(limit);
    ordered
}
