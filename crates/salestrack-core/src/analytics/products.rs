//! Top products by revenue.
//!
//! Line items from every sale are flattened and grouped by product name.
//! Items whose product could not be resolved are skipped.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::GroupBy;
use crate::money::Money;
use crate::types::Sale;

/// Ranking size for the dashboard and analytics report.
pub const TOP_PRODUCTS: usize = 5;

/// Ranking size for the product performance view.
pub const PRODUCT_PERFORMANCE_TOP: usize = 10;

/// Units sold and revenue for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub name: String,
    pub quantity: i64,
    pub revenue: Money,
}

/// Ranks products by summed line revenue, highest first, keeping `limit`.
///
/// Equal revenues keep the order in which the products were first seen.
pub fn rank_products<'a, I>(sales: I, limit: usize) -> Vec<ProductSales>
where
    I: IntoIterator<Item = &'a Sale>,
{
    let mut groups = GroupBy::new();

    for item in sales.into_iter().flat_map(|sale| sale.items.iter()) {
        let Some(product) = item.product.as_ref() else {
            continue;
        };

        let entry = groups.entry(&product.name, || ProductSales {
            name: product.name.clone(),
            quantity: 0,
            revenue: Money::zero(),
        });
        entry.quantity += item.quantity;
        entry.revenue += item.line_total;
    }

    let mut ranked = groups.into_vec();
    ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    ranked.truncate(limit);
    ranked
}

/// Ranking used by the dedicated product performance view.
pub fn product_performance<'a, I>(sales: I) -> Vec<ProductSales>
where
    I: IntoIterator<Item = &'a Sale>,
{
    rank_products(sales, PRODUCT_PERFORMANCE_TOP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{days_ago, item, sale, with_items};
    use proptest::prelude::*;

    #[test]
    fn test_groups_by_name_and_sorts_by_revenue() {
        let sales = vec![
            with_items(
                sale("s1", Some(days_ago(1)), 0),
                vec![item(Some("Laptop"), 1, 250_000_00), item(Some("Mouse"), 2, 5_000_00)],
            ),
            with_items(
                sale("s2", Some(days_ago(2)), 0),
                vec![item(Some("Mouse"), 3, 7_500_00), item(None, 4, 99_999_00)],
            ),
        ];

        let ranked = rank_products(&sales, TOP_PRODUCTS);
        assert_eq!(
            ranked,
            vec![
                ProductSales {
                    name: "Laptop".to_string(),
                    quantity: 1,
                    revenue: Money::from_cents(250_000_00),
                },
                ProductSales {
                    name: "Mouse".to_string(),
                    quantity: 5,
                    revenue: Money::from_cents(12_500_00),
                },
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_encounter_order() {
        let sales = vec![with_items(
            sale("s1", None, 0),
            vec![
                item(Some("Pen"), 1, 500),
                item(Some("Cup"), 1, 900),
                item(Some("Ink"), 1, 500),
            ],
        )];

        let names: Vec<_> = rank_products(&sales, 10).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Cup", "Pen", "Ink"]);
    }

    #[test]
    fn test_limit_is_caller_supplied() {
        let items = (0..12)
            .map(|i| item(Some(&format!("P{:02}", i)), 1, 100 * (i + 1)))
            .collect();
        let sales = vec![with_items(sale("s1", None, 0), items)];

        assert_eq!(rank_products(&sales, TOP_PRODUCTS).len(), 5);
        assert_eq!(product_performance(&sales).len(), 10);
        assert_eq!(rank_products(&sales, 0).len(), 0);
        assert_eq!(product_performance(&sales)[0].name, "P11");
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_products(&[], TOP_PRODUCTS).is_empty());
    }

    proptest! {
        #[test]
        fn prop_ranking_is_bounded_and_non_increasing(
            lines in prop::collection::vec((0usize..6, 1i64..20, 0i64..100_000), 0..40),
            limit in 0usize..8,
        ) {
            let items = lines
                .iter()
                .map(|(p, qty, cents)| item(Some(&format!("P{}", p)), *qty, *cents))
                .collect();
            let sales = vec![with_items(sale("s", None, 0), items)];

            let ranked = rank_products(&sales, limit);
            prop_assert!(ranked.len() <= limit);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].revenue >= pair[1].revenue);
            }
        }
    }
}
