//! # Sale Repository
//!
//! Database operations for sales and sale items.
//!
//! ## Loading a Snapshot
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Loading                                      │
//! │                                                                         │
//! │  1. SALES    sales LEFT JOIN customers        → Vec<SaleRow>           │
//! │              newest first, undated last                                │
//! │                                                                         │
//! │  2. ITEMS    sale_items LEFT JOIN products    → Vec<SaleItemRow>       │
//! │              same sale filter, insertion order                         │
//! │                                                                         │
//! │  3. ATTACH   group items by sale_id, convert rows into Sale            │
//! │              unknown tokens → None / default, bad dates → None         │
//! │                                                                         │
//! │  Two queries per call, however many sales.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Writing
//! `create`, `update` and `delete` run in one transaction each. A sale's
//! stored `total` is the pre-tax subtotal; `tax` is computed at the stored
//! tax rate. Each write keeps `customers.total_purchases` equal to the
//! number of sales pointing at that customer.

use std::collections::HashMap;

use salestrack_core::input::{NewSale, SaleTotals, SaleUpdate};
use salestrack_core::record::parse_timestamp;
use salestrack_core::{
    BusinessSettings, CoreError, CustomerRef, Money, PaymentMethod, ProductRef, Sale, SaleItem,
    SaleStatus, TaxRate,
};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use super::{format_timestamp, generate_id, now_timestamp};
use crate::error::{DbError, DbResult};

// =============================================================================
// Rows
// =============================================================================

/// Raw `sales` row with the customer's name joined in.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    date: Option<String>,
    total_cents: i64,
    tax_cents: i64,
    status: String,
    payment_method: Option<String>,
    customer_id: Option<String>,
    customer_name: Option<String>,
    notes: Option<String>,
}

/// Raw `sale_items` row with the product's name joined in.
#[derive(Debug, sqlx::FromRow)]
struct SaleItemRow {
    id: String,
    sale_id: String,
    product_id: Option<String>,
    product_name: Option<String>,
    quantity: i64,
    unit_price_cents: i64,
    line_total_cents: i64,
}

impl From<SaleItemRow> for SaleItem {
    fn from(row: SaleItemRow) -> Self {
        // A dangling product_id (product deleted) leaves no name to join
        let product = match (row.product_id, row.product_name) {
            (Some(id), Some(name)) => Some(ProductRef { id, name }),
            _ => None,
        };

        SaleItem {
            id: row.id,
            product,
            quantity: row.quantity,
            unit_price: Money::from_cents(row.unit_price_cents),
            line_total: Money::from_cents(row.line_total_cents),
        }
    }
}

impl SaleRow {
    fn into_sale(self, items: Vec<SaleItem>) -> Sale {
        let customer = self.customer_id.map(|id| CustomerRef {
            name: self.customer_name.unwrap_or_else(|| id.clone()),
            id,
        });

        Sale {
            id: self.id,
            date: self.date.as_deref().and_then(parse_timestamp),
            total: Money::from_cents(self.total_cents),
            tax: Money::from_cents(self.tax_cents),
            status: SaleStatus::from_token(&self.status).unwrap_or_default(),
            payment_method: self
                .payment_method
                .as_deref()
                .and_then(PaymentMethod::from_token),
            customer,
            items,
            notes: self.notes,
        }
    }
}

/// Pairs sale rows with their items, keeping the sale order.
fn attach_items(rows: Vec<SaleRow>, items: Vec<SaleItemRow>) -> Vec<Sale> {
    let mut by_sale: HashMap<String, Vec<SaleItem>> = HashMap::new();
    for item in items {
        by_sale
            .entry(item.sale_id.clone())
            .or_default()
            .push(item.into());
    }

    rows.into_iter()
        .map(|row| {
            let items = by_sale.remove(&row.id).unwrap_or_default();
            row.into_sale(items)
        })
        .collect()
}

// =============================================================================
// Queries
// =============================================================================

const SELECT_SALES: &str = r#"
    SELECT
        s.id,
        s.date,
        s.total_cents,
        s.tax_cents,
        s.status,
        s.payment_method,
        s.customer_id,
        c.name AS customer_name,
        s.notes
    FROM sales s
    LEFT JOIN customers c ON c.id = s.customer_id
"#;

const SELECT_ITEMS: &str = r#"
    SELECT
        si.id,
        si.sale_id,
        si.product_id,
        p.name AS product_name,
        si.quantity,
        si.unit_price_cents,
        si.line_total_cents
    FROM sale_items si
    LEFT JOIN products p ON p.id = si.product_id
"#;

/// Newest first. NULL dates sort lowest in SQLite, so they come last.
const NEWEST_FIRST: &str = "ORDER BY s.date DESC, s.rowid DESC";

// =============================================================================
// Repository
// =============================================================================

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Lists every sale, newest first, with customer, items and products.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales_sql = format!("{SELECT_SALES} {NEWEST_FIRST}");
        let rows: Vec<SaleRow> = sqlx::query_as(&sales_sql).fetch_all(&self.pool).await?;

        let items_sql = format!("{SELECT_ITEMS} ORDER BY si.rowid");
        let items: Vec<SaleItemRow> = sqlx::query_as(&items_sql).fetch_all(&self.pool).await?;

        debug!(sales = rows.len(), items = items.len(), "Loaded sales");
        Ok(attach_items(rows, items))
    }

    /// The `limit` newest sales, with items.
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sales_sql = format!("{SELECT_SALES} {NEWEST_FIRST} LIMIT ?1");
        let rows: Vec<SaleRow> = sqlx::query_as(&sales_sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let items_sql = format!(
            "{SELECT_ITEMS} WHERE si.sale_id IN (
                SELECT s.id FROM sales s {NEWEST_FIRST} LIMIT ?1
            ) ORDER BY si.rowid"
        );
        let items: Vec<SaleItemRow> = sqlx::query_as(&items_sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(attach_items(rows, items))
    }

    /// Gets a sale by ID, with items.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sales_sql = format!("{SELECT_SALES} WHERE s.id = ?1");
        let Some(row) = sqlx::query_as::<_, SaleRow>(&sales_sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let items_sql = format!("{SELECT_ITEMS} WHERE si.sale_id = ?1 ORDER BY si.rowid");
        let items: Vec<SaleItemRow> = sqlx::query_as(&items_sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(Some(row.into_sale(items.into_iter().map(SaleItem::from).collect())))
    }

    /// Creates a sale and its items in one transaction.
    ///
    /// ## What This Does
    /// 1. Validates the input (items present, quantities in range)
    /// 2. Checks the customer and every product exist
    /// 3. Computes totals at the stored tax rate
    /// 4. Inserts the sale, then each item with its frozen line total
    /// 5. Counts the purchase against the customer
    ///
    /// Nothing is written if any step fails.
    pub async fn create(&self, sale: &NewSale) -> DbResult<Sale> {
        sale.validate()?;

        let mut tx = self.pool.begin().await?;

        if let Some(customer_id) = &sale.customer_id {
            ensure_exists(&mut tx, "customers", customer_id)
                .await?
                .then_some(())
                .ok_or_else(|| CoreError::CustomerNotFound(customer_id.clone()))?;
        }
        for item in &sale.items {
            ensure_exists(&mut tx, "products", &item.product_id)
                .await?
                .then_some(())
                .ok_or_else(|| CoreError::ProductNotFound(item.product_id.clone()))?;
        }

        let rate = stored_tax_rate(&mut tx).await?;
        let totals = SaleTotals::compute(&sale.items, rate);

        let id = generate_id();
        let now = now_timestamp();
        debug!(id = %id, items = sale.items.len(), "Creating sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, date, total_cents, tax_cents, status, payment_method,
                customer_id, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
            "#,
        )
        .bind(&id)
        .bind(format_timestamp(sale.date))
        .bind(totals.subtotal.cents())
        .bind(totals.tax.cents())
        .bind(sale.status.as_str())
        .bind(sale.payment_method.map(|m| m.as_str()))
        .bind(&sale.customer_id)
        .bind(&sale.notes)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        for item in &sale.items {
            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    id, sale_id, product_id, quantity,
                    unit_price_cents, line_total_cents, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(generate_id())
            .bind(&id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price.cents())
            .bind(item.line_total().cents())
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(customer_id) = &sale.customer_id {
            adjust_purchases(&mut tx, customer_id, 1).await?;
        }

        tx.commit().await?;

        info!(
            id = %id,
            subtotal = totals.subtotal.cents(),
            tax = totals.tax.cents(),
            "Sale created"
        );

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", &id))
    }

    /// Replaces a sale's header fields. Items are not touched.
    ///
    /// Moving the sale to another customer moves the purchase count with it.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Sale doesn't exist
    /// * `Err(DbError::Invalid)` - Customer doesn't exist
    pub async fn update(&self, id: &str, update: &SaleUpdate) -> DbResult<Sale> {
        update.validate()?;
        debug!(id = %id, "Updating sale");

        let mut tx = self.pool.begin().await?;

        let Some(previous) = stored_customer(&mut tx, id).await? else {
            return Err(DbError::not_found("Sale", id));
        };

        if let Some(customer_id) = &update.customer_id {
            ensure_exists(&mut tx, "customers", customer_id)
                .await?
                .then_some(())
                .ok_or_else(|| CoreError::CustomerNotFound(customer_id.clone()))?;
        }

        sqlx::query(
            r#"
            UPDATE sales SET
                date = ?2,
                total_cents = ?3,
                tax_cents = ?4,
                status = ?5,
                payment_method = ?6,
                customer_id = ?7,
                notes = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(format_timestamp(update.date))
        .bind(update.total.cents())
        .bind(update.tax.cents())
        .bind(update.status.as_str())
        .bind(update.payment_method.map(|m| m.as_str()))
        .bind(&update.customer_id)
        .bind(&update.notes)
        .bind(now_timestamp())
        .execute(&mut *tx)
        .await?;

        if previous != update.customer_id {
            if let Some(old) = &previous {
                adjust_purchases(&mut tx, old, -1).await?;
            }
            if let Some(new) = &update.customer_id {
                adjust_purchases(&mut tx, new, 1).await?;
            }
        }

        tx.commit().await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", id))
    }

    /// Deletes a sale and its items in one transaction.
    ///
    /// Returns `false` when no sale had this ID.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting sale");

        let mut tx = self.pool.begin().await?;

        let Some(customer_id) = stored_customer(&mut tx, id).await? else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if let Some(customer_id) = &customer_id {
            adjust_purchases(&mut tx, customer_id, -1).await?;
        }

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Counts all sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn ensure_exists(
    tx: &mut Transaction<'_, Sqlite>,
    table: &'static str,
    id: &str,
) -> DbResult<bool> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)");
    let exists: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(&mut **tx).await?;
    Ok(exists != 0)
}

/// The sale's customer column: `None` when the sale doesn't exist,
/// `Some(None)` when it has no customer.
async fn stored_customer(
    tx: &mut Transaction<'_, Sqlite>,
    sale_id: &str,
) -> DbResult<Option<Option<String>>> {
    let customer: Option<Option<String>> =
        sqlx::query_scalar("SELECT customer_id FROM sales WHERE id = ?1")
            .bind(sale_id)
            .fetch_optional(&mut **tx)
            .await?;
    Ok(customer)
}

/// Shifts a customer's purchase count, never below zero.
async fn adjust_purchases(
    tx: &mut Transaction<'_, Sqlite>,
    customer_id: &str,
    delta: i64,
) -> DbResult<()> {
    sqlx::query(
        "UPDATE customers SET total_purchases = MAX(total_purchases + ?2, 0) WHERE id = ?1",
    )
    .bind(customer_id)
    .bind(delta)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn stored_tax_rate(tx: &mut Transaction<'_, Sqlite>) -> DbResult<TaxRate> {
    let pct: Option<f64> = sqlx::query_scalar("SELECT tax_rate FROM business_settings WHERE id = 1")
        .fetch_optional(&mut **tx)
        .await?;

    let pct = pct.unwrap_or_else(|| BusinessSettings::default().tax_rate);
    Ok(TaxRate::from_percentage(pct))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{Duration, TimeZone, Utc};
    use salestrack_core::input::{CustomerInput, NewSaleItem, ProductInput};
    use salestrack_core::{CustomerStatus, ProductStatus};

    struct Fixture {
        db: Database,
        laptop: String,
        lamp: String,
        john: String,
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let product = |name: &str, cents: i64| ProductInput {
            name: name.to_string(),
            description: None,
            price: Money::from_cents(cents),
            stock: 10,
            category: None,
            status: ProductStatus::Active,
        };
        let laptop = db.products().create(&product("Laptop", 250_000_00)).await.unwrap();
        let lamp = db.products().create(&product("Desk Lamp", 3_000_00)).await.unwrap();

        let john = db
            .customers()
            .create(&CustomerInput {
                name: "John Doe".to_string(),
                email: None,
                phone: None,
                address: None,
                status: CustomerStatus::Active,
            })
            .await
            .unwrap();

        Fixture {
            db,
            laptop: laptop.id,
            lamp: lamp.id,
            john: john.id,
        }
    }

    fn day(d: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, d, 10, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_computes_totals_and_joins() {
        let f = fixture().await;
        let sale = NewSale::new(day(16))
            .with_item(NewSaleItem::new(&f.laptop, Money::from_cents(250_000_00), 1))
            .with_item(NewSaleItem::new(&f.lamp, Money::from_cents(3_000_00), 3))
            .with_payment_method(PaymentMethod::Transfer)
            .with_customer(&f.john);

        let created = f.db.sales().create(&sale).await.unwrap();

        assert_eq!(created.total.cents(), 259_000_00);
        assert_eq!(created.tax.cents(), 19_425_00);
        assert_eq!(created.grand_total().cents(), 278_425_00);
        assert_eq!(created.date, Some(day(16)));
        assert_eq!(created.payment_method, Some(PaymentMethod::Transfer));
        assert_eq!(created.customer.as_ref().map(|c| c.name.as_str()), Some("John Doe"));
        assert_eq!(created.items.len(), 2);
        assert_eq!(created.items[1].line_total.cents(), 9_000_00);
        assert_eq!(
            created.items[0].product.as_ref().map(|p| p.name.as_str()),
            Some("Laptop")
        );
    }

    #[tokio::test]
    async fn test_create_uses_stored_tax_rate() {
        let f = fixture().await;
        f.db.settings()
            .upsert(&BusinessSettings {
                tax_rate: 0.0,
                ..BusinessSettings::default()
            })
            .await
            .unwrap();

        let sale = NewSale::new(day(1))
            .with_item(NewSaleItem::new(&f.lamp, Money::from_cents(3_000_00), 1));
        let created = f.db.sales().create(&sale).await.unwrap();
        assert!(created.tax.is_zero());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_references() {
        let f = fixture().await;

        let ghost_product = NewSale::new(day(1))
            .with_item(NewSaleItem::new("no-such-product", Money::from_cents(100), 1));
        let err = f.db.sales().create(&ghost_product).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(CoreError::ProductNotFound(_))));

        let ghost_customer = NewSale::new(day(1))
            .with_item(NewSaleItem::new(&f.lamp, Money::from_cents(100), 1))
            .with_customer("no-such-customer");
        let err = f.db.sales().create(&ghost_customer).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(CoreError::CustomerNotFound(_))));

        let empty = NewSale::new(day(1));
        assert!(matches!(
            f.db.sales().create(&empty).await.unwrap_err(),
            DbError::Invalid(CoreError::EmptySale)
        ));

        assert_eq!(f.db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_recent() {
        let f = fixture().await;
        for d in [3, 15, 9] {
            let sale = NewSale::new(day(d))
                .with_item(NewSaleItem::new(&f.lamp, Money::from_cents(3_000_00), 1));
            f.db.sales().create(&sale).await.unwrap();
        }

        let dates: Vec<_> = f
            .db
            .sales()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.date)
            .collect();
        assert_eq!(dates, vec![Some(day(15)), Some(day(9)), Some(day(3))]);

        let recent = f.db.sales().recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, Some(day(15)));
        assert!(recent.iter().all(|s| s.items.len() == 1));
    }

    #[tokio::test]
    async fn test_row_defaults_for_bad_stored_values() {
        let f = fixture().await;
        sqlx::query(
            "INSERT INTO sales (id, date, total_cents, tax_cents, status, payment_method, created_at, updated_at)
             VALUES ('garbled', 'sometime', 500, 0, 'mystery', 'cheque', 'x', 'x'),
                    ('undated', NULL, 700, 0, 'pending', 'cash', 'x', 'x')",
        )
        .execute(f.db.pool())
        .await
        .unwrap();

        let sale = f.db.sales().get_by_id("garbled").await.unwrap().unwrap();
        assert_eq!(sale.date, None);
        assert_eq!(sale.status, SaleStatus::Completed);
        assert_eq!(sale.payment_method, None);
        assert!(sale.items.is_empty());

        let sale = NewSale::new(day(2))
            .with_item(NewSaleItem::new(&f.lamp, Money::from_cents(100), 1));
        f.db.sales().create(&sale).await.unwrap();

        let listed = f.db.sales().list().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed.last().map(|s| s.id.as_str()), Some("undated"));
        assert_eq!(listed.last().and_then(|s| s.payment_method), Some(PaymentMethod::Cash));
    }

    #[tokio::test]
    async fn test_deleted_product_leaves_unresolved_line() {
        let f = fixture().await;
        let sale = NewSale::new(day(5))
            .with_item(NewSaleItem::new(&f.lamp, Money::from_cents(3_000_00), 2));
        let created = f.db.sales().create(&sale).await.unwrap();

        assert!(f.db.products().delete(&f.lamp).await.unwrap());

        let reloaded = f.db.sales().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.items.len(), 1);
        assert_eq!(reloaded.items[0].product, None);
        assert_eq!(reloaded.items[0].line_total.cents(), 6_000_00);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let f = fixture().await;
        let sale = NewSale::new(day(5))
            .with_item(NewSaleItem::new(&f.lamp, Money::from_cents(3_000_00), 1));
        let created = f.db.sales().create(&sale).await.unwrap();

        let update = SaleUpdate {
            date: day(6),
            total: Money::from_cents(2_500_00),
            tax: Money::zero(),
            status: SaleStatus::Cancelled,
            payment_method: Some(PaymentMethod::Card),
            customer_id: Some(f.john.clone()),
            notes: Some("refunded in part".to_string()),
        };
        let updated = f.db.sales().update(&created.id, &update).await.unwrap();
        assert_eq!(updated.status, SaleStatus::Cancelled);
        assert_eq!(updated.total.cents(), 2_500_00);
        assert_eq!(updated.date, Some(day(6)));
        assert_eq!(updated.items.len(), 1);

        assert!(f.db.sales().delete(&created.id).await.unwrap());
        assert!(!f.db.sales().delete(&created.id).await.unwrap());

        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(f.db.pool())
            .await
            .unwrap();
        assert_eq!(orphans, 0);

        let missing = f.db.sales().update("gone", &update).await.unwrap_err();
        assert!(matches!(missing, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_writes_keep_purchase_counts() {
        let f = fixture().await;
        let purchases = |id: String| {
            let db = f.db.clone();
            async move {
                db.customers()
                    .get_by_id(&id)
                    .await
                    .unwrap()
                    .unwrap()
                    .total_purchases
            }
        };
        let jane = f
            .db
            .customers()
            .create(&CustomerInput {
                name: "Jane Roe".to_string(),
                email: None,
                phone: None,
                address: None,
                status: CustomerStatus::Active,
            })
            .await
            .unwrap()
            .id;

        let sale = NewSale::new(day(7))
            .with_item(NewSaleItem::new(&f.lamp, Money::from_cents(3_000_00), 1))
            .with_customer(&f.john);
        let first = f.db.sales().create(&sale).await.unwrap();
        f.db.sales().create(&sale).await.unwrap();
        assert_eq!(purchases(f.john.clone()).await, 2);

        let mut update = SaleUpdate {
            date: day(7),
            total: first.total,
            tax: first.tax,
            status: SaleStatus::Completed,
            payment_method: None,
            customer_id: Some(jane.clone()),
            notes: None,
        };
        f.db.sales().update(&first.id, &update).await.unwrap();
        assert_eq!(purchases(f.john.clone()).await, 1);
        assert_eq!(purchases(jane.clone()).await, 1);

        // Same customer again leaves the counts alone
        update.notes = Some("edited".to_string());
        f.db.sales().update(&first.id, &update).await.unwrap();
        assert_eq!(purchases(jane.clone()).await, 1);

        update.customer_id = Some("no-such-customer".to_string());
        let err = f.db.sales().update(&first.id, &update).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(CoreError::CustomerNotFound(_))));
        assert_eq!(purchases(jane.clone()).await, 1);

        update.customer_id = None;
        f.db.sales().update(&first.id, &update).await.unwrap();
        assert_eq!(purchases(jane.clone()).await, 0);

        let second = f.db.sales().list().await.unwrap();
        let johns = second
            .iter()
            .find(|s| s.customer.as_ref().map(|c| c.id.as_str()) == Some(f.john.as_str()))
            .unwrap();
        assert!(f.db.sales().delete(&johns.id).await.unwrap());
        assert_eq!(purchases(f.john.clone()).await, 0);
    }

    #[tokio::test]
    async fn test_snapshot_feeds_analytics() {
        use salestrack_core::analytics::{AnalyticsReport, TimeRange};

        let f = fixture().await;
        let now = Utc::now();
        for days_back in [1, 2, 40] {
            let sale = NewSale::new(now - Duration::days(days_back))
                .with_item(NewSaleItem::new(&f.laptop, Money::from_cents(1_000_00), 1))
                .with_customer(&f.john);
            f.db.sales().create(&sale).await.unwrap();
        }

        let sales = f.db.sales().list().await.unwrap();
        let report = AnalyticsReport::build(&sales, TimeRange::Last7Days, now.fixed_offset());
        assert_eq!(report.metrics.sales_count, 2);
        assert_eq!(report.top_customers[0].purchases, 2);
        assert_eq!(report.top_products[0].name, "Laptop");
    }
}
