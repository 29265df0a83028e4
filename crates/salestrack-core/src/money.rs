//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a month of sales as floats drifts:                             │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (kobo, cents)                        │
//! │    Revenue totals, per-day buckets and rankings are exact sums.        │
//! │    Only the growth rate (a percentage) is a float.                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use salestrack_core::money::Money;
//!
//! let price = Money::from_cents(250_000_00); // ₦250,000.00
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.cents(), 500_000_00);
//!
//! // Amounts coming from a JSON export are parsed from their text form
//! let parsed = Money::from_decimal_str("1875.5").unwrap();
//! assert_eq!(parsed.cents(), 187_550);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (kobo for NGN, cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction (growth deltas) may go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as the raw integer**: the frontend divides by 100 for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use salestrack_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal amount in major units ("25000", "1875.5", "-3.25").
    ///
    /// Digits past the second decimal place are rounded half-up. Returns
    /// `None` for anything that is not a plain decimal number (exponents,
    /// `NaN`, empty strings, overflow).
    ///
    /// ## Example
    /// ```rust
    /// use salestrack_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal_str("10.99").unwrap().cents(), 1099);
    /// assert_eq!(Money::from_decimal_str("0.125").unwrap().cents(), 13);
    /// assert!(Money::from_decimal_str("1e5").is_none());
    /// ```
    pub fn from_decimal_str(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let major: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

        let mut digits = fraction.chars().map(|c| i64::from(c as u8 - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().map(|d| d >= 5).unwrap_or(false);

        let minor = tenths * 10 + hundredths + i64::from(round_up);
        let cents = major.checked_mul(100)?.checked_add(minor)?;

        Some(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Value as a float in minor units, for ratio calculations only.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Calculates tax on this amount, rounding half-up to the minor unit.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`
    ///
    /// ## Example
    /// ```rust
    /// use salestrack_core::money::Money;
    /// use salestrack_core::types::TaxRate;
    ///
    /// // ₦250.00 at 7.5% VAT = ₦18.75
    /// let tax = Money::from_cents(25_000).calculate_tax(TaxRate::from_bps(750));
    /// assert_eq!(tax.cents(), 1875);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 prevents overflow on large amounts
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity. Saturates at the `i64` bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Divides by a count, rounding half away from zero.
    ///
    /// Returns `None` when `count` is zero; callers decide what an empty
    /// average means.
    ///
    /// ## Example
    /// ```rust
    /// use salestrack_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(6000).div_round(3), Some(Money::from_cents(2000)));
    /// assert_eq!(Money::from_cents(1000).div_round(3), Some(Money::from_cents(333)));
    /// assert_eq!(Money::from_cents(500).div_round(0), None);
    /// ```
    pub fn div_round(&self, count: u64) -> Option<Money> {
        if count == 0 {
            return None;
        }
        let amount = self.0 as i128;
        let count = count as i128;
        let half = count / 2;
        let quotient = if amount >= 0 {
            (amount + half) / count
        } else {
            (amount - half) / count
        };
        Some(Money(quotient as i64))
    }

    /// Formats with a currency symbol, thousands grouping and two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use salestrack_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(124_567_000).format_with_symbol("₦"), "₦1,245,670.00");
    /// assert_eq!(Money::from_cents(-550).format_with_symbol("$"), "-$5.50");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}{}", sign, symbol, self.grouped_abs())
    }

    /// Absolute value rendered as `1,234.56`.
    fn grouped_abs(&self) -> String {
        let major = (self.0 / 100).unsigned_abs().to_string();
        let mut grouped = String::with_capacity(major.len() + major.len() / 3);
        for (i, ch) in major.chars().enumerate() {
            if i > 0 && (major.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{}.{:02}", grouped, self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Grouped two-decimal rendering without a currency symbol (`-1,234.50`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}", sign, self.grouped_abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Sums of imported amounts saturate instead of overflowing.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_str() {
        assert_eq!(Money::from_decimal_str("25000").unwrap().cents(), 2_500_000);
        assert_eq!(Money::from_decimal_str("1875.5").unwrap().cents(), 187_550);
        assert_eq!(Money::from_decimal_str("0.07").unwrap().cents(), 7);
        assert_eq!(Money::from_decimal_str(".5").unwrap().cents(), 50);
        assert_eq!(Money::from_decimal_str("-3.25").unwrap().cents(), -325);
        assert_eq!(Money::from_decimal_str("2.345").unwrap().cents(), 235);
        assert_eq!(Money::from_decimal_str("2.344").unwrap().cents(), 234);

        assert!(Money::from_decimal_str("").is_none());
        assert!(Money::from_decimal_str(".").is_none());
        assert!(Money::from_decimal_str("abc").is_none());
        assert!(Money::from_decimal_str("1e21").is_none());
        assert!(Money::from_decimal_str("99999999999999999999").is_none());
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(100_000)), "1,000.00");
        assert_eq!(format!("{}", Money::from_cents(-123_456_789)), "-1,234,567.89");
        assert_eq!(format!("{}", Money::zero()), "0.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(217_500).format_with_symbol("₦"), "₦2,175.00");
        assert_eq!(Money::from_cents(5).format_with_symbol("$"), "$0.05");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_sums_saturate() {
        let huge = Money::from_cents(5_000_000_000_000_000_000);
        assert_eq!((huge + huge).cents(), i64::MAX);

        let total: Money = [huge, huge, Money::from_cents(1)].iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        let mut running = huge;
        running += huge;
        assert_eq!(running, Money::from_cents(i64::MAX));
        assert_eq!(huge.multiply_quantity(999).cents(), i64::MAX);
    }

    #[test]
    fn test_tax_calculation_rounds_half_up() {
        // 7.5% of 10.10 = 0.7575 → 0.76
        let tax = Money::from_cents(1010).calculate_tax(TaxRate::from_bps(750));
        assert_eq!(tax.cents(), 76);
    }

    #[test]
    fn test_div_round() {
        assert_eq!(Money::from_cents(2).div_round(4), Some(Money::from_cents(1)));
        assert_eq!(Money::from_cents(1).div_round(4), Some(Money::from_cents(0)));
        assert_eq!(Money::from_cents(-2).div_round(4), Some(Money::from_cents(-1)));
        assert_eq!(Money::zero().div_round(0), None);
    }
}
