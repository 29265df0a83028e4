//! # salestrack-db: Database Layer for SalesTrack
//!
//! This crate provides database access for SalesTrack.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SalesTrack Data Flow                             │
//! │                                                                         │
//! │  CLI command (salestrack report --range 7days)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  salestrack-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │    Schema    │  │   │
//! │  │   │   (pool.rs)   │    │               │    │ (schema.sql) │  │   │
//! │  │   │               │    │ SaleRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ idempotent,  │  │   │
//! │  │   │ Connection    │    │ CustomerRepo  │    │ run on       │  │   │
//! │  │   │ Management    │    │ SettingsRepo  │    │ connect      │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Sale> snapshot ──► salestrack_core::analytics (pure)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`schema`] - Embedded schema bootstrap
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (sale, product, customer, settings)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use salestrack_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("salestrack.db")).await?;
//!
//! let sales = db.sales().list().await?;
//! let settings = db.settings().get().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::settings::SettingsRepository;
