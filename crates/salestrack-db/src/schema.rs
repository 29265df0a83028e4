//! # Schema Bootstrap
//!
//! Creates the tables on connect.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Bootstrap                                   │
//! │                                                                         │
//! │  Database::new(config)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  schema.sql (embedded with include_str!)                               │
//! │       │  CREATE TABLE IF NOT EXISTS ...                                │
//! │       │  CREATE INDEX IF NOT EXISTS ...                                │
//! │       ▼                                                                 │
//! │  Existing tables are left untouched                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no version table. A column change means a new database file.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::{DbError, DbResult};

/// The schema script, embedded at compile time.
pub const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Tables the schema creates, in dependency order.
pub const TABLES: &[&str] = &[
    "customers",
    "products",
    "sales",
    "sale_items",
    "business_settings",
];

/// Applies the schema script. Safe to run on every start.
pub async fn apply_schema(pool: &SqlitePool) -> DbResult<()> {
    info!("Applying database schema");

    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    info!(tables = TABLES.len(), "Schema ready");
    Ok(())
}

/// Lists the expected tables that are missing, for diagnostics.
pub async fn missing_tables(pool: &SqlitePool) -> DbResult<Vec<&'static str>> {
    let present: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
            .fetch_all(pool)
            .await?;

    Ok(TABLES
        .iter()
        .copied()
        .filter(|table| !present.iter().any(|name| name == table))
        .collect())
}
