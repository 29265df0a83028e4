//! # Input Records
//!
//! What callers hand to the data-access layer when creating or updating
//! records, plus the sale totals computed from a sale's lines.
//!
//! ## Sale Entry Flow
//! ```text
//! NewSale { items: [NewSaleItem { product, price, qty }, ...] }
//!      │
//!      ▼
//! validate()                     ← every line has a product, qty 1..=999
//!      │
//!      ▼
//! totals(settings.tax_rate())    ← subtotal, tax (half-up), total
//!      │
//!      ▼
//! store: sale.total = subtotal (pre-tax), sale.tax = tax
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{
    BusinessSettings, CustomerStatus, PaymentMethod, ProductStatus, SaleStatus, TaxRate,
};
use crate::validation::{
    validate_business_name, validate_currency_code, validate_customer_name, validate_email,
    validate_price, validate_product_name, validate_quantity, validate_stock,
    validate_tax_rate_percent,
};
use crate::MAX_SALE_ITEMS;

// =============================================================================
// Sale Totals
// =============================================================================

/// Totals for a sale being entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleTotals {
    /// Sum of line totals; stored as the sale's pre-tax `total`.
    pub subtotal: Money,
    pub tax: Money,
    /// `subtotal + tax`, the amount the customer pays.
    pub total: Money,
}

impl SaleTotals {
    /// Computes totals from lines and the account's tax rate.
    ///
    /// Tax is applied once to the subtotal, not per line.
    ///
    /// ## Example
    /// ```rust
    /// use salestrack_core::input::{NewSaleItem, SaleTotals};
    /// use salestrack_core::money::Money;
    /// use salestrack_core::types::TaxRate;
    ///
    /// let items = vec![NewSaleItem::new("p-1", Money::from_cents(15_000_00), 2)];
    /// let totals = SaleTotals::compute(&items, TaxRate::from_bps(750));
    /// assert_eq!(totals.subtotal.cents(), 30_000_00);
    /// assert_eq!(totals.tax.cents(), 2_250_00);
    /// assert_eq!(totals.total.cents(), 32_250_00);
    /// ```
    pub fn compute(items: &[NewSaleItem], rate: TaxRate) -> Self {
        let subtotal: Money = items.iter().map(NewSaleItem::line_total).sum();
        let tax = subtotal.calculate_tax(rate);
        SaleTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

// =============================================================================
// New Sale
// =============================================================================

/// One line of a sale being entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSaleItem {
    pub product_id: String,
    /// Product price at the moment of sale.
    pub unit_price: Money,
    pub quantity: i64,
}

impl NewSaleItem {
    pub fn new(product_id: impl Into<String>, unit_price: Money, quantity: i64) -> Self {
        NewSaleItem {
            product_id: product_id.into(),
            unit_price,
            quantity,
        }
    }

    /// `unit_price × quantity`, frozen into the stored line.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.product_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "product".to_string(),
            }
            .into());
        }
        validate_quantity(self.quantity)?;
        validate_price(self.unit_price)?;
        Ok(())
    }
}

/// A sale to be created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    pub date: DateTime<Utc>,
    pub status: SaleStatus,
    pub payment_method: Option<PaymentMethod>,
    pub customer_id: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<NewSaleItem>,
}

impl NewSale {
    /// Creates a completed sale dated `date` with no lines yet.
    pub fn new(date: DateTime<Utc>) -> Self {
        NewSale {
            date,
            status: SaleStatus::Completed,
            payment_method: None,
            customer_id: None,
            notes: None,
            items: Vec::new(),
        }
    }

    /// Adds a line (builder style).
    pub fn with_item(mut self, item: NewSaleItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Checks the rules the entry form enforces before submitting.
    pub fn validate(&self) -> CoreResult<()> {
        if self.items.is_empty() {
            return Err(CoreError::EmptySale);
        }
        if self.items.len() > MAX_SALE_ITEMS {
            return Err(ValidationError::OutOfRange {
                field: "items".to_string(),
                min: 1,
                max: MAX_SALE_ITEMS as i64,
            }
            .into());
        }
        for item in &self.items {
            item.validate()?;
        }
        Ok(())
    }

    /// Totals at the given tax rate.
    pub fn totals(&self, rate: TaxRate) -> SaleTotals {
        SaleTotals::compute(&self.items, rate)
    }
}

/// Full replacement of a sale's header fields; lines are not edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleUpdate {
    pub date: DateTime<Utc>,
    pub total: Money,
    pub tax: Money,
    pub status: SaleStatus,
    pub payment_method: Option<PaymentMethod>,
    pub customer_id: Option<String>,
    pub notes: Option<String>,
}

impl SaleUpdate {
    pub fn validate(&self) -> CoreResult<()> {
        validate_price(self.total)?;
        validate_price(self.tax)?;
        Ok(())
    }
}

// =============================================================================
// Product / Customer / Settings Inputs
// =============================================================================

/// Fields for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub stock: i64,
    pub category: Option<String>,
    pub status: ProductStatus,
}

impl ProductInput {
    pub fn validate(&self) -> CoreResult<()> {
        validate_product_name(&self.name)?;
        validate_price(self.price)?;
        validate_stock(self.stock)?;
        Ok(())
    }
}

/// Fields for creating or replacing a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: CustomerStatus,
}

impl CustomerInput {
    pub fn validate(&self) -> CoreResult<()> {
        validate_customer_name(&self.name)?;
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            validate_email(email)?;
        }
        Ok(())
    }
}

impl BusinessSettings {
    /// Checks settings before they are saved.
    pub fn validate(&self) -> CoreResult<()> {
        validate_business_name(&self.business_name)?;
        validate_tax_rate_percent(self.tax_rate)?;
        validate_currency_code(&self.currency)?;
        if !self.email.trim().is_empty() {
            validate_email(&self.email)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sale_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_totals_apply_tax_to_subtotal() {
        let items = vec![
            NewSaleItem::new("laptop", Money::from_cents(250_000_00), 1),
            NewSaleItem::new("lamp", Money::from_cents(3_000_00), 3),
        ];
        let totals = SaleTotals::compute(&items, TaxRate::from_percentage(7.5));

        assert_eq!(totals.subtotal.cents(), 259_000_00);
        assert_eq!(totals.tax.cents(), 19_425_00);
        assert_eq!(totals.total.cents(), 278_425_00);
    }

    #[test]
    fn test_totals_with_no_items_are_zero() {
        let totals = SaleTotals::compute(&[], TaxRate::from_bps(750));
        assert!(totals.subtotal.is_zero());
        assert!(totals.tax.is_zero());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_new_sale_requires_items() {
        let sale = NewSale::new(sale_date());
        assert!(matches!(sale.validate(), Err(CoreError::EmptySale)));
    }

    #[test]
    fn test_new_sale_rejects_bad_lines() {
        let missing_product = NewSale::new(sale_date())
            .with_item(NewSaleItem::new("  ", Money::from_cents(100), 1));
        assert!(matches!(
            missing_product.validate(),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));

        let zero_qty = NewSale::new(sale_date())
            .with_item(NewSaleItem::new("p-1", Money::from_cents(100), 0));
        assert!(zero_qty.validate().is_err());

        let ok = NewSale::new(sale_date())
            .with_item(NewSaleItem::new("p-1", Money::from_cents(100), 2))
            .with_payment_method(PaymentMethod::Card)
            .with_customer("c-1");
        assert!(ok.validate().is_ok());
        assert_eq!(ok.totals(TaxRate::zero()).total.cents(), 200);
    }

    #[test]
    fn test_customer_input_email_is_optional() {
        let mut input = CustomerInput {
            name: "Jane Smith".to_string(),
            email: None,
            phone: Some("08023456789".to_string()),
            address: None,
            status: CustomerStatus::Active,
        };
        assert!(input.validate().is_ok());

        input.email = Some("".to_string());
        assert!(input.validate().is_ok());

        input.email = Some("not-an-email".to_string());
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_settings_validation() {
        assert!(BusinessSettings::default().validate().is_ok());

        let bad_rate = BusinessSettings {
            tax_rate: 150.0,
            ..BusinessSettings::default()
        };
        assert!(bad_rate.validate().is_err());

        let bad_currency = BusinessSettings {
            currency: "NAIRA".to_string(),
            ..BusinessSettings::default()
        };
        assert!(bad_currency.validate().is_err());
    }
}
