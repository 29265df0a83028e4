//! # Settings Repository
//!
//! The single business settings row. Reading before anything was saved
//! returns the defaults rather than an error.

use salestrack_core::BusinessSettings;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::now_timestamp;
use crate::error::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    business_name: String,
    address: String,
    phone: String,
    email: String,
    tax_id: String,
    tax_rate: f64,
    currency: String,
}

impl From<SettingsRow> for BusinessSettings {
    fn from(row: SettingsRow) -> Self {
        let defaults = BusinessSettings::default();
        BusinessSettings {
            business_name: row.business_name,
            address: row.address,
            phone: row.phone,
            email: row.email,
            tax_id: row.tax_id,
            tax_rate: if row.tax_rate.is_finite() && row.tax_rate >= 0.0 {
                row.tax_rate
            } else {
                defaults.tax_rate
            },
            currency: row.currency,
        }
    }
}

/// Repository for business settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Returns the stored settings, or the defaults when none were saved.
    pub async fn get(&self) -> DbResult<BusinessSettings> {
        let row: Option<SettingsRow> = sqlx::query_as(
            r#"
            SELECT business_name, address, phone, email, tax_id, tax_rate, currency
            FROM business_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(row.into()),
            None => {
                debug!("No settings stored, using defaults");
                Ok(BusinessSettings::default())
            }
        }
    }

    /// Inserts or replaces the settings row.
    pub async fn upsert(&self, settings: &BusinessSettings) -> DbResult<()> {
        settings.validate()?;

        sqlx::query(
            r#"
            INSERT INTO business_settings (
                id, business_name, address, phone, email, tax_id, tax_rate, currency, updated_at
            ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                business_name = excluded.business_name,
                address = excluded.address,
                phone = excluded.phone,
                email = excluded.email,
                tax_id = excluded.tax_id,
                tax_rate = excluded.tax_rate,
                currency = excluded.currency,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(settings.business_name.trim())
        .bind(&settings.address)
        .bind(&settings.phone)
        .bind(&settings.email)
        .bind(&settings.tax_id)
        .bind(settings.tax_rate)
        .bind(settings.currency.trim().to_ascii_uppercase())
        .bind(now_timestamp())
        .execute(&self.pool)
        .await?;

        info!(
            business_name = %settings.business_name,
            currency = %settings.currency,
            tax_rate = settings.tax_rate,
            "Business settings saved"
        );
        Ok(())
    }
}
