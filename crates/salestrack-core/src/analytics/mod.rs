//! # Sales Analytics
//!
//! Pure aggregation over an in-memory snapshot of sales.
//!
//! ## Passes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Analytics over one snapshot                         │
//! │                                                                         │
//! │  all sales ──┬──► range::filter_sales(range, now) ──► filtered         │
//! │              │                                          │               │
//! │              ├──► daily::daily_series(now)              ├──► products   │
//! │              │    (fixed 30 days, unfiltered)           ├──► payments   │
//! │              │                                          ├──► customers  │
//! │              └──────────────► metrics::compute_metrics ◄┘               │
//! │                               (growth uses the unfiltered set)         │
//! │                                                                         │
//! │  report::AnalyticsReport::build runs all of the above                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules shared by every pass
//! - Nothing here fails. Empty input gives empty or zero output.
//! - "now" is always passed in. Its UTC offset decides where calendar days
//!   and months begin.
//! - Groups come out in first-encounter order before any sort, and sorts are
//!   stable, so equal revenues keep first-encounter order.

pub mod customers;
pub mod daily;
pub mod metrics;
pub mod payments;
pub mod products;
pub mod range;
pub mod report;

use std::collections::HashMap;

pub use customers::{rank_customers, CustomerSpend, TOP_CUSTOMERS};
pub use daily::{daily_series, DailyBucket, DAILY_WINDOW_DAYS};
pub use metrics::{compute_metrics, SalesMetrics};
pub use payments::{payment_distribution, PaymentMethodShare, UNKNOWN_PAYMENT_LABEL};
pub use products::{
    product_performance, rank_products, ProductSales, PRODUCT_PERFORMANCE_TOP, TOP_PRODUCTS,
};
pub use range::{filter_sales, RangeWindow, TimeRange};
pub use report::AnalyticsReport;

/// Insertion-ordered grouping by string key.
///
/// `HashMap` alone would make group order depend on hashing; the index map
/// only locates the slot, the `Vec` keeps encounter order.
#[derive(Debug)]
pub(crate) struct GroupBy<V> {
    index: HashMap<String, usize>,
    groups: Vec<V>,
}

impl<V> GroupBy<V> {
    pub(crate) fn new() -> Self {
        GroupBy {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Returns the group for `key`, creating it with `init` on first sight.
    pub(crate) fn entry(&mut self, key: &str, init: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.groups.push(init());
                let slot = self.groups.len() - 1;
                self.index.insert(key.to_string(), slot);
                slot
            }
        };
        &mut self.groups[slot]
    }

    pub(crate) fn into_vec(self) -> Vec<V> {
        self.groups
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Sale builders shared by the analytics tests.

    use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

    use crate::money::Money;
    use crate::types::{CustomerRef, PaymentMethod, ProductRef, Sale, SaleItem, SaleStatus};

    /// 2026-10-16 14:30 at UTC+01:00 (West Africa Time).
    pub fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 14, 30, 0)
            .unwrap()
    }

    pub fn days_ago(days: i64) -> DateTime<Utc> {
        (now() - Duration::days(days)).with_timezone(&Utc)
    }

    pub fn sale(id: &str, date: Option<DateTime<Utc>>, total_cents: i64) -> Sale {
        Sale {
            id: id.to_string(),
            date,
            total: Money::from_cents(total_cents),
            tax: Money::zero(),
            status: SaleStatus::Completed,
            payment_method: Some(PaymentMethod::Cash),
            customer: None,
            items: Vec::new(),
            notes: None,
        }
    }

    pub fn with_customer(mut sale: Sale, id: &str, name: &str) -> Sale {
        sale.customer = Some(CustomerRef {
            id: id.to_string(),
            name: name.to_string(),
        });
        sale
    }

    pub fn with_method(mut sale: Sale, method: Option<PaymentMethod>) -> Sale {
        sale.payment_method = method;
        sale
    }

    pub fn item(product: Option<&str>, quantity: i64, line_total_cents: i64) -> SaleItem {
        SaleItem {
            id: format!("item-{}-{}", product.unwrap_or("none"), line_total_cents),
            product: product.map(|name| ProductRef {
                id: format!("p-{}", name.to_lowercase()),
                name: name.to_string(),
            }),
            quantity,
            unit_price: Money::from_cents(line_total_cents / quantity.max(1)),
            line_total: Money::from_cents(line_total_cents),
        }
    }

    pub fn with_items(mut sale: Sale, items: Vec<SaleItem>) -> Sale {
        sale.items = items;
        sale
    }
}
