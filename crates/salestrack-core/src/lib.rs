//! # salestrack-core: Pure Business Logic for SalesTrack
//!
//! Domain types, money arithmetic and the sales analytics aggregator for a
//! small-business sales tracker. Nothing in this crate performs I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SalesTrack Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 salestrack CLI (apps/salestrack-cli)            │   │
//! │  │        report ──► dashboard ──► receipt   (JSON on stdout)      │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │ snapshot                          │ JSON export       │
//! │  ┌──────────────▼───────────────────┐               │                   │
//! │  │   salestrack-db (SQLite, sqlx)   │               │                   │
//! │  │   repositories, schema bootstrap │               │                   │
//! │  └──────────────┬───────────────────┘               │                   │
//! │                 │ Vec<Sale>                         │ record::*         │
//! │  ┌──────────────▼──────────────────────────────────▼───────────────┐   │
//! │  │             ★ salestrack-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │  │  types  │ │  money  │ │ analytics │ │dashboard │ │ record │ │   │
//! │  │  │  Sale   │ │  Money  │ │  filter   │ │ summary  │ │ loose  │ │   │
//! │  │  │Customer │ │ TaxRate │ │  rankings │ │  recent  │ │  JSON  │ │   │
//! │  │  └─────────┘ └─────────┘ └───────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, Product, Customer, BusinessSettings)
//! - [`money`] - Money type with integer arithmetic in minor units
//! - [`analytics`] - Range filter, daily series, rankings, metrics, report
//! - [`dashboard`] - All-time summary and recent sales
//! - [`input`] - Sale entry, product/customer inputs, sale totals
//! - [`record`] - Loose JSON records and their conversion into the domain
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: the current time is always a parameter
//! 2. **No I/O**: database and file access live in other crates
//! 3. **Integer Money**: amounts are minor units (i64), never floats
//! 4. **Total Analytics**: malformed sale data degrades, it never errors
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{FixedOffset, TimeZone};
//! use salestrack_core::analytics::{AnalyticsReport, TimeRange};
//! use salestrack_core::money::Money;
//! use salestrack_core::types::TaxRate;
//!
//! // ₦250.00 at 7.5% VAT
//! let tax = Money::from_cents(25_000).calculate_tax(TaxRate::from_bps(750));
//! assert_eq!(tax.cents(), 1875);
//!
//! let now = FixedOffset::east_opt(3600).unwrap()
//!     .with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
//! let report = AnalyticsReport::build(&[], TimeRange::Last30Days, now);
//! assert_eq!(report.metrics.sales_count, 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod dashboard;
pub mod error;
pub mod input;
pub mod money;
pub mod record;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use analytics::{AnalyticsReport, TimeRange};
pub use dashboard::DashboardSummary;
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines in a single sale.
pub const MAX_SALE_ITEMS: usize = 100;

/// Maximum quantity on one sale line.
///
/// Catches typos like 1000 for 10 at entry time.
pub const MAX_ITEM_QUANTITY: i64 = 999;
