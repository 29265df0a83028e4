//! # Domain Types
//!
//! Core domain types used throughout SalesTrack.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │    SaleItem     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  product (ref)  │──►│  id             │       │
//! │  │  date (opt)     │   │  quantity       │   │  name           │       │
//! │  │  total, tax     │   │  unit_price     │   │  price, stock   │       │
//! │  │  payment (opt)  │   │  line_total     │   │  category       │       │
//! │  │  customer (opt) │   └─────────────────┘   └─────────────────┘       │
//! │  └────────┬────────┘                                                    │
//! │           │            ┌─────────────────┐   ┌─────────────────┐       │
//! │           └───────────►│    Customer     │   │BusinessSettings │       │
//! │                        │  id, name       │   │  tax_rate (bps) │       │
//! │                        │  total_purchases│   │  currency       │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Optional Fields
//! A `Sale` as seen by the analytics code has already been through the
//! boundary conversion (see [`crate::record`] and the db row mapping):
//! anything the store could not supply is an explicit `None`, never a
//! sentinel value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so Nigerian VAT (7.5%) is 750 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage as stored in business settings.
    ///
    /// Negative percentages clamp to zero.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round().max(0.0) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Awaiting payment.
    Pending,
    /// Paid and finalized.
    #[default]
    Completed,
    /// Cancelled after creation.
    Cancelled,
}

impl SaleStatus {
    /// Token used in storage and exports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Pending => "pending",
            SaleStatus::Completed => "completed",
            SaleStatus::Cancelled => "cancelled",
        }
    }

    /// Parses a stored token; unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(SaleStatus::Pending),
            "completed" => Some(SaleStatus::Completed),
            "cancelled" | "canceled" => Some(SaleStatus::Cancelled),
            _ => None,
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
///
/// A sale without a recognised method carries `None` and is reported under
/// the "Unknown" label by the payment distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    MobileMoney,
}

impl PaymentMethod {
    /// Token used in storage and exports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::MobileMoney => "mobile_money",
        }
    }

    /// Human-readable name for receipts.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::MobileMoney => "Mobile Money",
        }
    }

    /// Parses a stored token; empty or unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "card" => Some(PaymentMethod::Card),
            "transfer" => Some(PaymentMethod::Transfer),
            "mobile_money" => Some(PaymentMethod::MobileMoney),
            _ => None,
        }
    }
}

// =============================================================================
// References
// =============================================================================

/// The product a sale line points at, as resolved when the sale was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRef {
    pub id: String,
    pub name: String,
}

/// The customer attached to a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerRef {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
///
/// `unit_price` and `line_total` are frozen at sale time; they are never
/// recomputed from the product's current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleItem {
    pub id: String,
    /// `None` when the product was deleted or could not be resolved.
    pub product: Option<ProductRef>,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: String,
    /// `None` when the stored timestamp was missing or unparseable.
    #[ts(as = "Option<String>")]
    pub date: Option<DateTime<Utc>>,
    /// Pre-tax total.
    pub total: Money,
    pub tax: Money,
    pub status: SaleStatus,
    pub payment_method: Option<PaymentMethod>,
    pub customer: Option<CustomerRef>,
    pub items: Vec<SaleItem>,
    pub notes: Option<String>,
}

impl Sale {
    /// Total including tax, as printed on the receipt.
    #[inline]
    pub fn grand_total(&self) -> Money {
        self.total + self.tax
    }
}

// =============================================================================
// Product
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Active,
    OutOfStock,
}

impl ProductStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::OutOfStock => "out_of_stock",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "active" => Some(ProductStatus::Active),
            "out_of_stock" => Some(ProductStatus::OutOfStock),
            _ => None,
        }
    }
}

/// A product in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub stock: i64,
    pub category: Option<String>,
    pub status: ProductStatus,
}

// =============================================================================
// Customer
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "active" => Some(CustomerStatus::Active),
            "inactive" => Some(CustomerStatus::Inactive),
            _ => None,
        }
    }
}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: CustomerStatus,
    /// Running count of purchases, maintained by the store.
    pub total_purchases: i64,
}

// =============================================================================
// Business Settings
// =============================================================================

/// Default VAT rate (Nigeria), in percent.
pub const DEFAULT_TAX_RATE_PERCENT: f64 = 7.5;

/// Default currency code.
pub const DEFAULT_CURRENCY: &str = "NGN";

/// Account-wide settings shown on receipts and used for sale tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BusinessSettings {
    pub business_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub tax_id: String,
    /// Percentage, e.g. 7.5 meaning 7.5%.
    pub tax_rate: f64,
    /// ISO 4217 code.
    pub currency: String,
}

impl BusinessSettings {
    /// Tax rate in basis points, for money arithmetic.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_percentage(self.tax_rate)
    }

    /// Display symbol for the configured currency.
    pub fn currency_symbol(&self) -> String {
        currency_symbol(&self.currency)
    }

    /// Formats an amount the way receipts and dashboards display it.
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol())
    }
}

impl Default for BusinessSettings {
    fn default() -> Self {
        BusinessSettings {
            business_name: "Sales Tracker".to_string(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            tax_id: String::new(),
            tax_rate: DEFAULT_TAX_RATE_PERCENT,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Maps a currency code to its display symbol.
///
/// Unknown codes render as the code followed by a space (`"KES 10.00"`).
pub fn currency_symbol(code: &str) -> String {
    match code.trim().to_ascii_uppercase().as_str() {
        "NGN" => "₦".to_string(),
        "USD" => "$".to_string(),
        "GBP" => "£".to_string(),
        "EUR" => "€".to_string(),
        other => format!("{} ", other),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
