//! # Record Boundary
//!
//! Loose JSON records as a hosted store exports them, and their conversion
//! into the typed domain.
//!
//! ## Where Defaults Live
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  JSON export         SaleRecord (every field Option)     Sale           │
//! │  ───────────   ──►   ─────────────────────────────  ──►  ────────────   │
//! │  "total": 25000      total: Some(Number)                  Money(2500000)│
//! │  "date": "bogus"     date: Some("bogus")                  date: None    │
//! │  "payment_method":   payment_method: Some("cheque")       None          │
//! │     "cheque"                                                            │
//! │  (no customer)       customer: None                       None          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every fallback happens in the `From` impls below. The aggregator never
//! sees a half-parsed record.
//!
//! Amounts are major units (`25000` = ₦25,000.00). They are read from the
//! number's decimal text, never through `f64`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::money::Money;
use crate::types::{
    BusinessSettings, Customer, CustomerRef, CustomerStatus, PaymentMethod, Product, ProductRef,
    ProductStatus, Sale, SaleItem, SaleStatus,
};

// =============================================================================
// Field Parsers
// =============================================================================

/// Reads an amount in major units from a JSON number or numeric string.
///
/// Missing, malformed or negative amounts become zero.
///
/// ## Example
/// ```rust
/// use salestrack_core::record::parse_amount;
/// use serde_json::json;
///
/// assert_eq!(parse_amount(Some(&json!(1875))).cents(), 187_500);
/// assert_eq!(parse_amount(Some(&json!("12.50"))).cents(), 1_250);
/// assert!(parse_amount(Some(&json!(null))).is_zero());
/// assert!(parse_amount(None).is_zero());
/// ```
pub fn parse_amount(value: Option<&Value>) -> Money {
    let parsed = match value {
        Some(Value::Number(n)) => Money::from_decimal_str(&n.to_string()),
        Some(Value::String(s)) => Money::from_decimal_str(s),
        _ => None,
    };
    parsed.filter(|m| !m.is_negative()).unwrap_or_default()
}

/// Reads a whole-number quantity; anything else becomes zero.
fn parse_quantity(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Parses a stored timestamp.
///
/// Accepts RFC 3339 (`2026-10-16T09:30:00.000Z`), a zone-less timestamp
/// (read as UTC, with `T` or a space) and a bare date (midnight UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Reads an exported date: timestamp text, or epoch milliseconds as
/// JavaScript's `Date.getTime()` produces them.
fn parse_date_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_timestamp(text),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

// =============================================================================
// Records
// =============================================================================

/// A product as exported, possibly embedded in a sale line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
    pub price: Option<Value>,
    pub stock: Option<Value>,
    #[serde(deserialize_with = "lenient::string")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub status: Option<String>,
}

/// A customer as exported, possibly embedded in a sale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomerRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub status: Option<String>,
    pub total_purchases: Option<Value>,
}

/// One exported sale line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SaleItemRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub product_id: Option<String>,
    #[serde(deserialize_with = "lenient::record")]
    pub product: Option<ProductRecord>,
    pub quantity: Option<Value>,
    /// Unit price.
    pub price: Option<Value>,
    /// Line total.
    pub total: Option<Value>,
}

/// One exported sale with its customer and lines joined in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SaleRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    /// ISO-8601 text or epoch milliseconds.
    pub date: Option<Value>,
    pub total: Option<Value>,
    pub tax: Option<Value>,
    #[serde(deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub payment_method: Option<String>,
    #[serde(deserialize_with = "lenient::record")]
    pub customer: Option<CustomerRecord>,
    /// Lines that are not objects are dropped.
    #[serde(deserialize_with = "lenient::list")]
    pub items: Vec<SaleItemRecord>,
    #[serde(deserialize_with = "lenient::string")]
    pub notes: Option<String>,
}

/// Exported business settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettingsRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub business_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub tax_id: Option<String>,
    pub tax_rate: Option<Value>,
    #[serde(deserialize_with = "lenient::string")]
    pub currency: Option<String>,
}

/// Field deserializers that turn a wrong JSON type into "absent" instead
/// of failing the whole document.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Text field. Numbers (bigint keys) are kept as their decimal text.
    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => Some(text),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Nested record. Anything that isn't a matching object is `None`.
    pub fn record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
    }

    /// List of records, keeping only the entries that convert.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(values) => values
                .into_iter()
                .filter_map(|value| serde_json::from_value(value).ok())
                .collect(),
            _ => Vec::new(),
        })
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl ProductRecord {
    /// Reference used on a sale line; `None` without a usable name.
    fn to_ref(&self, fallback_id: Option<&str>) -> Option<ProductRef> {
        let name = non_empty(self.name.clone())?;
        let id = self
            .id
            .clone()
            .or_else(|| fallback_id.map(str::to_string))
            .unwrap_or_default();
        Some(ProductRef { id, name })
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            name: non_empty(record.name).unwrap_or_default(),
            price: parse_amount(record.price.as_ref()),
            stock: parse_quantity(record.stock.as_ref()).max(0),
            status: record
                .status
                .as_deref()
                .and_then(ProductStatus::from_token)
                .unwrap_or_default(),
            id: record.id.unwrap_or_default(),
            description: non_empty(record.description),
            category: non_empty(record.category),
        }
    }
}

impl CustomerRecord {
    /// Reference used on a sale; `None` without an id, since grouping is by id.
    fn to_ref(&self) -> Option<CustomerRef> {
        let id = non_empty(self.id.clone())?;
        let name = non_empty(self.name.clone()).unwrap_or_else(|| id.clone());
        Some(CustomerRef { id, name })
    }
}

impl From<CustomerRecord> for Customer {
    fn from(record: CustomerRecord) -> Self {
        Customer {
            name: non_empty(record.name).unwrap_or_default(),
            status: record
                .status
                .as_deref()
                .and_then(CustomerStatus::from_token)
                .unwrap_or_default(),
            total_purchases: parse_quantity(record.total_purchases.as_ref()).max(0),
            id: record.id.unwrap_or_default(),
            email: non_empty(record.email),
            phone: non_empty(record.phone),
            address: non_empty(record.address),
        }
    }
}

impl From<SaleItemRecord> for SaleItem {
    fn from(record: SaleItemRecord) -> Self {
        let product = record
            .product
            .as_ref()
            .and_then(|p| p.to_ref(record.product_id.as_deref()));

        SaleItem {
            id: record.id.unwrap_or_default(),
            product,
            quantity: parse_quantity(record.quantity.as_ref()).max(0),
            unit_price: parse_amount(record.price.as_ref()),
            line_total: parse_amount(record.total.as_ref()),
        }
    }
}

impl From<SaleRecord> for Sale {
    fn from(record: SaleRecord) -> Self {
        Sale {
            id: record.id.unwrap_or_default(),
            date: record.date.as_ref().and_then(parse_date_value),
            total: parse_amount(record.total.as_ref()),
            tax: parse_amount(record.tax.as_ref()),
            status: record
                .status
                .as_deref()
                .and_then(SaleStatus::from_token)
                .unwrap_or_default(),
            payment_method: record.payment_method.as_deref().and_then(PaymentMethod::from_token),
            customer: record.customer.as_ref().and_then(CustomerRecord::to_ref),
            items: record
                .items
                .into_iter()
                .map(SaleItem::from)
                .collect(),
            notes: non_empty(record.notes),
        }
    }
}

impl From<SettingsRecord> for BusinessSettings {
    fn from(record: SettingsRecord) -> Self {
        let defaults = BusinessSettings::default();
        let tax_rate = match record.tax_rate {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
        .filter(|pct: &f64| pct.is_finite() && (0.0..=100.0).contains(pct))
        .unwrap_or(defaults.tax_rate);

        BusinessSettings {
            business_name: non_empty(record.business_name).unwrap_or(defaults.business_name),
            address: record.address.unwrap_or_default(),
            phone: record.phone.unwrap_or_default(),
            email: record.email.unwrap_or_default(),
            tax_id: record.tax_id.unwrap_or_default(),
            tax_rate,
            currency: non_empty(record.currency)
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or(defaults.currency),
        }
    }
}

// =============================================================================
// Snapshot File
// =============================================================================

/// A full export: sales plus the records the dashboard counts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotRecord {
    #[serde(deserialize_with = "lenient::list")]
    pub sales: Vec<SaleRecord>,
    #[serde(deserialize_with = "lenient::list")]
    pub products: Vec<ProductRecord>,
    #[serde(deserialize_with = "lenient::list")]
    pub customers: Vec<CustomerRecord>,
    #[serde(deserialize_with = "lenient::record")]
    pub business_settings: Option<SettingsRecord>,
}

/// Typed contents of an export file.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub sales: Vec<Sale>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub settings: BusinessSettings,
}

impl From<SnapshotRecord> for Snapshot {
    fn from(record: SnapshotRecord) -> Self {
        Snapshot {
            sales: record.sales.into_iter().map(Sale::from).collect(),
            products: record.products.into_iter().map(Product::from).collect(),
            customers: record.customers.into_iter().map(Customer::from).collect(),
            settings: record
                .business_settings
                .map(BusinessSettings::from)
                .unwrap_or_default(),
        }
    }
}

/// Parses an export file: either `{ "sales": [...], ... }` or a bare array
/// of sales.
///
/// Only JSON syntax errors fail; shape problems inside records degrade.
/// Entries that are not objects are dropped, wrong-typed fields read as
/// absent, and any other top-level value yields an empty snapshot.
pub fn parse_snapshot(json: &str) -> Result<Snapshot, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    Ok(match value {
        Value::Array(entries) => Snapshot {
            sales: entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value::<SaleRecord>(entry).ok())
                .map(Sale::from)
                .collect(),
            ..Snapshot::default()
        },
        Value::Object(_) => serde_json::from_value::<SnapshotRecord>(value)?.into(),
        _ => Snapshot::default(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_amounts_are_major_units() {
        assert_eq!(parse_amount(Some(&json!(25000))).cents(), 2_500_000);
        assert_eq!(parse_amount(Some(&json!(18.75))).cents(), 1_875);
        assert_eq!(parse_amount(Some(&json!("abc"))).cents(), 0);
        assert_eq!(parse_amount(Some(&json!(-5))).cents(), 0);
        assert_eq!(parse_amount(Some(&json!(true))).cents(), 0);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2026-10-16T09:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-16T10:30:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-16T09:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-16 09:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2026-10-16"),
            Some(Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_full_sale_record() {
        let record: SaleRecord = serde_json::from_value(json!({
            "id": "sale-1",
            "date": "2026-10-16T09:30:00.000Z",
            "total": 25000,
            "tax": 1875,
            "status": "completed",
            "payment_method": "mobile_money",
            "notes": "Mock sale 1",
            "customer": { "id": "c-1", "name": "John Doe", "email": "john@example.com" },
            "items": [{
                "id": "item-1",
                "product": { "id": "p-1", "name": "Laptop", "price": 250000 },
                "quantity": 1,
                "price": 25000,
                "total": 25000
            }]
        }))
        .unwrap();

        let sale = Sale::from(record);
        assert_eq!(sale.id, "sale-1");
        assert!(sale.date.is_some());
        assert_eq!(sale.total.cents(), 2_500_000);
        assert_eq!(sale.tax.cents(), 187_500);
        assert_eq!(sale.payment_method, Some(PaymentMethod::MobileMoney));
        assert_eq!(sale.customer.as_ref().map(|c| c.name.as_str()), Some("John Doe"));
        assert_eq!(sale.items.len(), 1);
        assert_eq!(
            sale.items[0].product.as_ref().map(|p| p.name.as_str()),
            Some("Laptop")
        );
        assert_eq!(sale.items[0].line_total.cents(), 2_500_000);
    }

    #[test]
    fn test_sparse_sale_record_defaults() {
        let record: SaleRecord = serde_json::from_value(json!({
            "date": "not a date",
            "payment_method": "cheque",
            "customer": { "name": "No Id" },
            "items": [{ "quantity": 2, "total": 100 }]
        }))
        .unwrap();

        let sale = Sale::from(record);
        assert_eq!(sale.date, None);
        assert!(sale.total.is_zero());
        assert_eq!(sale.status, SaleStatus::Completed);
        assert_eq!(sale.payment_method, None);
        assert_eq!(sale.customer, None);
        assert_eq!(sale.items[0].product, None);
        assert_eq!(sale.items[0].quantity, 2);
    }

    #[test]
    fn test_customer_name_falls_back_to_id() {
        let record = CustomerRecord {
            id: Some("c-9".to_string()),
            ..CustomerRecord::default()
        };
        assert_eq!(
            record.to_ref(),
            Some(CustomerRef {
                id: "c-9".to_string(),
                name: "c-9".to_string()
            })
        );
    }

    #[test]
    fn test_settings_record_defaults() {
        let settings = BusinessSettings::from(SettingsRecord {
            business_name: Some("Ada Stores".to_string()),
            tax_rate: Some(json!(250)),
            currency: Some("usd".to_string()),
            ..SettingsRecord::default()
        });

        assert_eq!(settings.business_name, "Ada Stores");
        assert_eq!(settings.tax_rate, 7.5);
        assert_eq!(settings.currency, "USD");
    }

    #[test]
    fn test_parse_snapshot_shapes() {
        let full = parse_snapshot(
            r#"{ "sales": [{ "id": "s1", "total": 10 }],
                 "products": [{ "id": "p1", "name": "Pen", "price": 2.5, "status": "out_of_stock" }],
                 "customers": [{ "id": "c1", "name": "Ann" }, { "id": "c2" }] }"#,
        )
        .unwrap();
        assert_eq!(full.sales.len(), 1);
        assert_eq!(full.products[0].price.cents(), 250);
        assert_eq!(full.products[0].status, ProductStatus::OutOfStock);
        assert_eq!(full.customers.len(), 2);
        assert_eq!(full.settings, BusinessSettings::default());

        let bare = parse_snapshot(r#"[{ "id": "s1" }, { "id": "s2" }]"#).unwrap();
        assert_eq!(bare.sales.len(), 2);
        assert!(bare.products.is_empty());

        assert!(parse_snapshot("not json").is_err());
    }

    #[test]
    fn test_numeric_id_keeps_the_rest_of_the_export() {
        let snapshot =
            parse_snapshot(r#"{"sales":[{"id":"ok","total":10},{"id":42,"total":20}]}"#).unwrap();

        assert_eq!(snapshot.sales.len(), 2);
        assert_eq!(snapshot.sales[1].id, "42");
        assert_eq!(snapshot.sales[1].total.cents(), 2_000);
    }

    #[test]
    fn test_numeric_date_is_epoch_millis() {
        let snapshot = parse_snapshot(r#"[{"id":"ok","date":1760600000000}]"#).unwrap();
        assert_eq!(
            snapshot.sales[0].date,
            Some(Utc.with_ymd_and_hms(2025, 10, 16, 7, 33, 20).unwrap())
        );

        let snapshot = parse_snapshot(r#"[{"id":"ok","date":true}]"#).unwrap();
        assert_eq!(snapshot.sales[0].date, None);
    }

    #[test]
    fn test_wrong_typed_nested_fields_degrade() {
        let snapshot = parse_snapshot(
            r#"[{"id":"ok","customer":"c-1","items":[7,{"product":"Pen","quantity":1,"total":5},
                {"product":{"name":"Ink","id":3},"quantity":"2","total":4}],"notes":{"x":1}}]"#,
        )
        .unwrap();

        let sale = &snapshot.sales[0];
        assert_eq!(sale.customer, None);
        assert_eq!(sale.notes, None);
        assert_eq!(sale.items.len(), 2);
        assert_eq!(sale.items[0].product, None);
        assert_eq!(
            sale.items[1].product,
            Some(ProductRef {
                id: "3".to_string(),
                name: "Ink".to_string()
            })
        );
        assert_eq!(sale.items[1].quantity, 2);
    }

    #[test]
    fn test_non_object_entries_are_dropped() {
        let bare = parse_snapshot(r#"[{"id":"s1"}, null, "s2", 3]"#).unwrap();
        assert_eq!(bare.sales.len(), 1);

        let full = parse_snapshot(
            r#"{"sales":"none","products":[{"name":"Pen"},false],"customers":null,
                "business_settings":[1,2]}"#,
        )
        .unwrap();
        assert!(full.sales.is_empty());
        assert_eq!(full.products.len(), 1);
        assert!(full.customers.is_empty());
        assert_eq!(full.settings, BusinessSettings::default());

        assert!(parse_snapshot("42").unwrap().sales.is_empty());
    }
}
