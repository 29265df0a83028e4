//! # Commands
//!
//! Each command loads a snapshot once, hands it to the pure aggregator and
//! returns a serializable view. Printing is left to `main`.
//!
//! ```text
//! ┌───────────────────────┐     ┌─────────────────────────┐     ┌──────────────┐
//! │ Source                │     │ salestrack-core         │     │ View         │
//! │ --input FILE (JSON)   │────►│ AnalyticsReport::build  │────►│ serde JSON   │
//! │ or SQLite database    │     │ DashboardSummary / ...  │     │              │
//! └───────────────────────┘     └─────────────────────────┘     └──────────────┘
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use chrono::{DateTime, FixedOffset, Utc};
use salestrack_core::analytics::{product_performance, AnalyticsReport, ProductSales, TimeRange};
use salestrack_core::dashboard::{recent_sales, DashboardSummary, RECENT_SALES_LIMIT};
use salestrack_core::record::{parse_snapshot, Snapshot};
use salestrack_core::{BusinessSettings, Customer, Money, Sale, SaleItem};
use salestrack_db::Database;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::CliConfig;

// =============================================================================
// Snapshot Loading
// =============================================================================

/// Where the snapshot comes from.
#[derive(Debug, Clone)]
pub enum Source {
    File(PathBuf),
    Database,
}

impl Source {
    pub fn from_input(input: Option<PathBuf>) -> Self {
        input.map_or(Source::Database, Source::File)
    }
}

/// Loads everything a command may need, in one pass.
pub async fn load_snapshot(source: &Source, config: &CliConfig) -> anyhow::Result<Snapshot> {
    match source {
        Source::File(path) => load_file(path).await,
        Source::Database => load_database(config).await,
    }
}

async fn load_file(path: &Path) -> anyhow::Result<Snapshot> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let snapshot = parse_snapshot(&text)
        .with_context(|| format!("{} is not a sales export", path.display()))?;

    info!(
        path = %path.display(),
        sales = snapshot.sales.len(),
        "Loaded snapshot from file"
    );
    Ok(snapshot)
}

async fn load_database(config: &CliConfig) -> anyhow::Result<Snapshot> {
    let db = Database::new(config.db_config())
        .await
        .with_context(|| format!("Failed to open {}", config.db_path.display()))?;

    let snapshot = async {
        Ok::<_, salestrack_db::DbError>(Snapshot {
            sales: db.sales().list().await?,
            products: db.products().list().await?,
            customers: db.customers().list().await?,
            settings: db.settings().get().await?,
        })
    }
    .await;
    db.close().await;

    let snapshot = snapshot?;
    info!(
        path = %config.db_path.display(),
        sales = snapshot.sales.len(),
        "Loaded snapshot from database"
    );
    Ok(snapshot)
}

// =============================================================================
// Report
// =============================================================================

/// Resolves a `--range` token. Unknown tokens fall back to the default.
pub fn resolve_range(token: Option<&str>) -> TimeRange {
    match token {
        None => TimeRange::default(),
        Some(token) => TimeRange::parse(token).unwrap_or_else(|| {
            warn!(
                token,
                fallback = %TimeRange::default(),
                "Unknown time range, using default"
            );
            TimeRange::default()
        }),
    }
}

pub fn report(snapshot: &Snapshot, range: TimeRange, now: DateTime<FixedOffset>) -> AnalyticsReport {
    debug!(range = %range, now = %now, "Building analytics report");
    AnalyticsReport::build(&snapshot.sales, range, now)
}

// =============================================================================
// Dashboard
// =============================================================================

/// Everything the dashboard page shows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView<'a> {
    pub summary: DashboardSummary,
    pub recent_sales: Vec<&'a Sale>,
    pub product_performance: Vec<ProductSales>,
}

pub fn dashboard(snapshot: &Snapshot) -> DashboardView<'_> {
    DashboardView {
        summary: DashboardSummary::from_snapshot(
            &snapshot.sales,
            snapshot.customers.len() as u64,
            snapshot.products.len() as u64,
        ),
        recent_sales: recent_sales(&snapshot.sales, RECENT_SALES_LIMIT),
        product_performance: product_performance(&snapshot.sales),
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Label printed for a line whose product no longer resolves.
pub const UNKNOWN_PRODUCT_LABEL: &str = "Unknown Product";

/// Everything a receipt prints for one sale. Data only; layout belongs to
/// the printer.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptTotals {
    pub sale_id: String,
    pub business_name: String,
    pub business_address: String,
    pub business_phone: String,
    pub business_email: String,
    pub business_tax_id: String,
    pub date: Option<DateTime<Utc>>,
    pub customer: Option<ReceiptCustomer>,
    /// Display label, e.g. `Mobile Money`.
    pub payment_method: Option<String>,
    pub items: Vec<ReceiptLine>,
    pub notes: Option<String>,
    pub currency: String,
    pub subtotal: Money,
    pub tax: Money,
    pub grand_total: Money,
    pub formatted: FormattedTotals,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptCustomer {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub product: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
    pub formatted_unit_price: String,
    pub formatted_line_total: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub subtotal: String,
    pub tax: String,
    pub grand_total: String,
}

impl ReceiptLine {
    fn new(item: &SaleItem, settings: &BusinessSettings) -> Self {
        ReceiptLine {
            product: item
                .product
                .as_ref()
                .map_or_else(|| UNKNOWN_PRODUCT_LABEL.to_string(), |p| p.name.clone()),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total,
            formatted_unit_price: settings.format_money(item.unit_price),
            formatted_line_total: settings.format_money(item.line_total),
        }
    }
}

impl ReceiptTotals {
    /// `customer` supplies contact details; the sale only carries a name.
    pub fn new(sale: &Sale, settings: &BusinessSettings, customer: Option<&Customer>) -> Self {
        let customer = sale.customer.as_ref().map(|c| ReceiptCustomer {
            name: c.name.clone(),
            email: customer.and_then(|full| full.email.clone()),
            phone: customer.and_then(|full| full.phone.clone()),
        });

        // Stored total is pre-tax
        let grand_total = sale.grand_total();
        ReceiptTotals {
            sale_id: sale.id.clone(),
            business_name: settings.business_name.clone(),
            business_address: settings.address.clone(),
            business_phone: settings.phone.clone(),
            business_email: settings.email.clone(),
            business_tax_id: settings.tax_id.clone(),
            date: sale.date,
            customer,
            payment_method: sale.payment_method.map(|m| m.label().to_string()),
            items: sale
                .items
                .iter()
                .map(|item| ReceiptLine::new(item, settings))
                .collect(),
            notes: sale.notes.clone(),
            currency: settings.currency.clone(),
            subtotal: sale.total,
            tax: sale.tax,
            grand_total,
            formatted: FormattedTotals {
                subtotal: settings.format_money(sale.total),
                tax: settings.format_money(sale.tax),
                grand_total: settings.format_money(grand_total),
            },
        }
    }
}

pub fn receipt(snapshot: &Snapshot, sale_id: &str) -> anyhow::Result<ReceiptTotals> {
    let sale = snapshot
        .sales
        .iter()
        .find(|sale| sale.id == sale_id)
        .ok_or_else(|| anyhow!("Sale not found: {}", sale_id))?;

    let customer = sale
        .customer
        .as_ref()
        .and_then(|c| snapshot.customers.iter().find(|full| full.id == c.id));

    Ok(ReceiptTotals::new(sale, &snapshot.settings, customer))
}

/// Looks up one sale instead of loading the whole snapshot.
pub async fn receipt_from_database(
    config: &CliConfig,
    sale_id: &str,
) -> anyhow::Result<ReceiptTotals> {
    let db = Database::new(config.db_config())
        .await
        .with_context(|| format!("Failed to open {}", config.db_path.display()))?;

    let found = async {
        let Some(sale) = db.sales().get_by_id(sale_id).await? else {
            return Ok(None);
        };
        let customer = match &sale.customer {
            Some(c) => db.customers().get_by_id(&c.id).await?,
            None => None,
        };
        let settings = db.settings().get().await?;
        Ok::<_, salestrack_db::DbError>(Some(ReceiptTotals::new(
            &sale,
            &settings,
            customer.as_ref(),
        )))
    }
    .await;
    db.close().await;

    found?.ok_or_else(|| anyhow!("Sale not found: {}", sale_id))
}

/// Current time in the store's offset.
pub fn store_now(config: &CliConfig) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&config.utc_offset)
}

// =============================================================================
// Unit Tests
// =============================================================================
