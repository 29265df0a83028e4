//! Revenue share per payment method.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::GroupBy;
use crate::money::Money;
use crate::types::Sale;

/// Label for sales recorded without a payment method.
pub const UNKNOWN_PAYMENT_LABEL: &str = "Unknown";

/// One slice of the payment-method distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodShare {
    /// Method token with its first character upper-cased (`Mobile_money`).
    pub name: String,
    pub value: Money,
    pub count: u32,
}

/// Groups sales by payment method, summing totals and counts.
///
/// Entries come out in first-encounter order. Consumers treat the list as a
/// set, so no ordering is promised beyond that.
///
/// ## Example
/// ```rust
/// use salestrack_core::analytics::payment_distribution;
///
/// assert!(payment_distribution(&[]).is_empty());
/// ```
pub fn payment_distribution<'a, I>(sales: I) -> Vec<PaymentMethodShare>
where
    I: IntoIterator<Item = &'a Sale>,
{
    let mut groups = GroupBy::new();

    for sale in sales {
        let key = sale
            .payment_method
            .map_or(UNKNOWN_PAYMENT_LABEL, |method| method.as_str());

        let entry = groups.entry(key, || PaymentMethodShare {
            name: capitalize_first(key),
            value: Money::zero(),
            count: 0,
        });
        entry.value += sale.total;
        entry.count += 1;
    }

    groups.into_vec()
}

fn capitalize_first(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
