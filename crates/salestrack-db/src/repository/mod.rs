//! # Repository Module
//!
//! Database repository implementations for SalesTrack.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  db.sales().list()                                              │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── SQL text (runtime-checked, sqlx::query_as)                        │
//! │  ├── *Row structs (#[derive(FromRow)], raw column types)               │
//! │  └── Row → domain conversion  ← every default applied here            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows keep the stored text for enums and dates. Unknown tokens and
//! unparseable dates become `None` or the type's default during conversion,
//! so one bad row never fails a whole listing.
//!
//! ## Available Repositories
//!
//! - [`SaleRepository`](sale::SaleRepository) - Sales with joined customer, items and products
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer CRUD
//! - [`SettingsRepository`](settings::SettingsRepository) - Business settings

pub mod customer;
pub mod product;
pub mod sale;
pub mod settings;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Generates a new record ID.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Stored timestamp format: RFC 3339 in UTC with milliseconds.
///
/// A fixed width and zone keep `ORDER BY date` chronological.
pub(crate) fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}
