//! # Customer Repository
//!
//! Database operations for customers.

use salestrack_core::input::CustomerInput;
use salestrack_core::{Customer, CustomerStatus};
use sqlx::SqlitePool;
use tracing::debug;

use super::{generate_id, now_timestamp};
use crate::error::{DbError, DbResult};

/// Raw `customers` row.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: String,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    status: String,
    total_purchases: i64,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            status: CustomerStatus::from_token(&row.status).unwrap_or_default(),
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            total_purchases: row.total_purchases.max(0),
        }
    }
}

const SELECT_CUSTOMERS: &str = r#"
    SELECT id, name, email, phone, address, status, total_purchases
    FROM customers
"#;

/// Empty strings from a form are stored as NULL.
fn blank_to_none(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists every customer, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let sql = format!("{SELECT_CUSTOMERS} ORDER BY name, id");
        let rows: Vec<CustomerRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        debug!(count = rows.len(), "Listed customers");
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let sql = format!("{SELECT_CUSTOMERS} WHERE id = ?1");
        let row: Option<CustomerRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Customer::from))
    }

    /// Inserts a new customer with a generated ID.
    pub async fn create(&self, input: &CustomerInput) -> DbResult<Customer> {
        input.validate()?;

        let id = generate_id();
        let now = now_timestamp();
        debug!(id = %id, "Creating customer");

        sqlx::query(
            r#"
            INSERT INTO customers (
                id, name, email, phone, address, status, total_purchases,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?7)
            "#,
        )
        .bind(&id)
        .bind(input.name.trim())
        .bind(blank_to_none(&input.email))
        .bind(blank_to_none(&input.phone))
        .bind(blank_to_none(&input.address))
        .bind(input.status.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", &id))
    }

    /// Replaces a customer's contact fields and status.
    ///
    /// `total_purchases` is left as stored.
    pub async fn update(&self, id: &str, input: &CustomerInput) -> DbResult<Customer> {
        input.validate()?;
        debug!(id = %id, "Updating customer");

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = ?2,
                email = ?3,
                phone = ?4,
                address = ?5,
                status = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(blank_to_none(&input.email))
        .bind(blank_to_none(&input.phone))
        .bind(blank_to_none(&input.address))
        .bind(input.status.as_str())
        .bind(now_timestamp())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", id))
    }

    /// Deletes a customer. Their sales stay, without a customer.
    ///
    /// Returns `false` when no customer had this ID.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts customers with `active` status.
    pub async fn count_active(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE status = ?1")
            .bind(CustomerStatus::Active.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
