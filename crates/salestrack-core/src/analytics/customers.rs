//! Top customers by amount spent.
//!
//! Only sales with a customer attached take part; walk-in sales are left
//! out rather than pooled as an anonymous customer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::GroupBy;
use crate::money::Money;
use crate::types::Sale;

/// Ranking size for the analytics report.
pub const TOP_CUSTOMERS: usize = 5;

/// Purchases and spend for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSpend {
    pub id: String,
    /// Name from the first sale seen for this customer.
    pub name: String,
    pub purchases: u32,
    pub spent: Money,
}

impl CustomerSpend {
    /// `spent / purchases`, or `None` for an entry with no purchases.
    pub fn average_order_value(&self) -> Option<Money> {
        self.spent.div_round(u64::from(self.purchases))
    }
}

/// Ranks customers by total spent, highest first, keeping `limit`.
pub fn rank_customers<'a, I>(sales: I, limit: usize) -> Vec<CustomerSpend>
where
    I: IntoIterator<Item = &'a Sale>,
{
    let mut groups = GroupBy::new();

    for sale in sales {
        let Some(customer) = sale.customer.as_ref() else {
            continue;
        };

        let entry = groups.entry(&customer.id, || CustomerSpend {
            id: customer.id.clone(),
            name: customer.name.clone(),
            purchases: 0,
            spent: Money::zero(),
        });
        entry.purchases += 1;
        entry.spent += sale.total;
    }

    let mut ranked = groups.into_vec();
    ranked.sort_by(|a, b| b.spent.cmp(&a.spent));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{sale, with_customer};

    #[test]
    fn test_groups_by_customer_id() {
        let sales = vec![
            with_customer(sale("1", None, 10_000), "c-1", "John Doe"),
            with_customer(sale("2", None, 45_000), "c-2", "Jane Smith"),
            with_customer(sale("3", None, 20_000), "c-1", "John D."),
            sale("4", None, 99_000),
        ];

        let ranked = rank_customers(&sales, TOP_CUSTOMERS);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, "c-2");
        assert_eq!(ranked[0].purchases, 1);
        assert_eq!(ranked[1].id, "c-1");
        assert_eq!(ranked[1].name, "John Doe");
        assert_eq!(ranked[1].purchases, 2);
        assert_eq!(ranked[1].spent.cents(), 30_000);
    }

    #[test]
    fn test_sale_without_customer_is_excluded() {
        let sales = vec![sale("1", None, 5_000)];
        assert!(rank_customers(&sales, TOP_CUSTOMERS).is_empty());
    }

    #[test]
    fn test_truncates_to_limit() {
        let sales: Vec<_> = (0..8)
            .map(|i| with_customer(sale(&i.to_string(), None, 100 * i), &format!("c-{}", i), "C"))
            .collect();

        let ranked = rank_customers(&sales, TOP_CUSTOMERS);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].id, "c-7");
        assert!(ranked.iter().all(|c| c.purchases >= 1));
    }

    #[test]
    fn test_average_order_value() {
        let spend = CustomerSpend {
            id: "c-1".to_string(),
            name: "John Doe".to_string(),
            purchases: 3,
            spent: Money::from_cents(10_000),
        };
        assert_eq!(spend.average_order_value(), Some(Money::from_cents(3_333)));

        let empty = CustomerSpend {
            purchases: 0,
            ..spend
        };
        assert_eq!(empty.average_order_value(), None);
    }
}
