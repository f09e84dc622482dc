//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Receipt for a $59.97 sale with 10% tax, in floating point:            │
//! │    59.97 * 0.1 = 5.997000000000001                                     │
//! │    59.97 + 5.997 = 65.967                                              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    5997 cents × 1000 bps = 599.7 cents → 600 cents  ($6.00)            │
//! │    5997 cents × 11000 bps = 6596.7 cents → 6597 cents ($65.97)         │
//! │    The exact value is computed in i128 and rounded exactly once.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price = Money::from_cents(1999); // $19.99
//! let line = price * 3;                // $59.97
//! assert_eq!(line.format_with_symbol("€"), "€59.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

/// Basis points in one whole (100%).
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: A product's stock value can go negative when stock is
///   oversold, so negative amounts must be representable
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating arithmetic**: extreme amounts clamp at the i64 bounds
///   instead of overflowing
/// - **Cents stay internal**: wire fields go through [`decimal`], which
///   carries them as two-decimal numbers (`5997` ⇄ `59.97`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_cents(1999); // Represents $19.99
    /// assert_eq!(price.cents(), 1999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
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

    /// Calculates tax on this amount, rounded half away from zero to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    /// use stockroom_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(5997); // $59.97
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1000));
    /// // $59.97 × 10% = $5.997 → $6.00
    /// assert_eq!(tax.cents(), 600);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let exact = self.0 as i128 * rate.bps() as i128;
        Money::from_cents(clamp_to_cents(div_round_half_away(exact, BPS_SCALE)))
    }

    /// Returns this amount with tax added, rounding the exact sum once.
    ///
    /// This is not always `self + self.calculate_tax(rate)`: the receipt
    /// total is the rounded exact total, and the tax line is rounded on its
    /// own.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    /// use stockroom_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(5997);
    /// // $59.97 + $5.997 = $65.967 → $65.97
    /// assert_eq!(subtotal.with_tax(TaxRate::from_bps(1000)).cents(), 6597);
    /// ```
    pub fn with_tax(&self, rate: TaxRate) -> Money {
        let exact = self.0 as i128 * (BPS_SCALE + rate.bps() as i128);
        Money::from_cents(clamp_to_cents(div_round_half_away(exact, BPS_SCALE)))
    }

    /// Formats the amount with exactly two decimals behind the given symbol.
    ///
    /// The sign goes in front of the symbol: `-$5.50`, never `$-5.50`.
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Integer division rounding half away from zero. `denominator` must be > 0.
fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

/// Narrows an exact amount to i64 cents, saturating at the bounds.
fn clamp_to_cents(exact: i128) -> i64 {
    i64::try_from(exact).unwrap_or(if exact < 0 { i64::MIN } else { i64::MAX })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows dollars; use [`Money::format_with_symbol`] for other
/// currencies.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by i64 (stock or sale quantities).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Serde adapter for cent fields that travel as two-decimal numbers.
///
/// ```text
/// i64 cents ──serialize──►  5997  → 59.97
/// number    ─deserialize─►  59.97 → 5997   (rounded to the nearest cent)
///                           20    → 2000
/// ```
///
/// Use with `#[serde(with = "stockroom_core::money::decimal")]` on an `i64`.
pub mod decimal {
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// 2^63: the first magnitude that no longer fits in i64 cents.
    const CENTS_LIMIT: f64 = 9_223_372_036_854_775_808.0;

    pub fn serialize<S>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*cents as f64 / 100.0)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        let cents = (amount * 100.0).round();
        if !cents.is_finite() || cents.abs() >= CENTS_LIMIT {
            return Err(de::Error::custom(format!(
                "amount {amount} is outside the representable range"
            )));
        }
        Ok(cents as i64)
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
        let money = Money::from_cents(1999);
        assert_eq!(money.cents(), 1999);
        assert_eq!(money.dollars(), 19);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(6597).format_with_symbol("£"), "£65.97");
        assert_eq!(Money::from_cents(5).format_with_symbol("¥"), "¥0.05");
        assert_eq!(Money::from_cents(-1).format_with_symbol("€"), "-€0.01");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((a * -2).cents(), -2000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_tax_on_receipt_subtotal() {
        // $59.97 at 10%: tax $5.997 → $6.00, total $65.967 → $65.97
        let subtotal = Money::from_cents(5997);
        let rate = TaxRate::from_bps(1000);
        assert_eq!(subtotal.calculate_tax(rate).cents(), 600);
        assert_eq!(subtotal.with_tax(rate).cents(), 6597);
    }

    #[test]
    fn test_total_rounds_independently_of_tax() {
        // $0.05 at 10%: tax $0.005 → $0.01, total $0.055 → $0.06
        let subtotal = Money::from_cents(5);
        let rate = TaxRate::from_bps(1000);
        assert_eq!(subtotal.calculate_tax(rate).cents(), 1);
        assert_eq!(subtotal.with_tax(rate).cents(), 6);

        // $0.14 at 10%: tax $0.014 → $0.01, total $0.154 → $0.15
        let subtotal = Money::from_cents(14);
        assert_eq!(subtotal.calculate_tax(rate).cents(), 1);
        assert_eq!(subtotal.with_tax(rate).cents(), 15);
    }

    #[test]
    fn test_negative_amounts_round_symmetrically() {
        let rate = TaxRate::from_bps(1000);
        assert_eq!(Money::from_cents(-5).calculate_tax(rate).cents(), -1);
        assert_eq!(Money::from_cents(-5997).with_tax(rate).cents(), -6597);
    }

    #[test]
    fn test_zero_rate() {
        let subtotal = Money::from_cents(1234);
        assert!(subtotal.calculate_tax(TaxRate::zero()).is_zero());
        assert_eq!(subtotal.with_tax(TaxRate::zero()), subtotal);
    }

    #[test]
    fn test_arithmetic_saturates_at_bounds() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);

        assert_eq!((max + Money::from_cents(1)).cents(), i64::MAX);
        assert_eq!((min - Money::from_cents(1)).cents(), i64::MIN);
        assert_eq!((max * 2).cents(), i64::MAX);
        assert_eq!((Money::from_cents(1999) * i64::MIN).cents(), i64::MIN);

        let total: Money = vec![max, max, Money::from_cents(5)].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        let mut running = min;
        running += min;
        assert_eq!(running.cents(), i64::MIN);
    }

    #[test]
    fn test_tax_clamps_instead_of_truncating() {
        let rate = TaxRate::from_bps(1000);
        assert_eq!(Money::from_cents(i64::MAX).with_tax(rate).cents(), i64::MAX);
        assert_eq!(Money::from_cents(i64::MIN).with_tax(rate).cents(), i64::MIN);
        // Tax alone is a tenth of the amount and always fits.
        assert_eq!(
            Money::from_cents(i64::MAX).calculate_tax(rate).cents(),
            922_337_203_685_477_581
        );
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Priced {
        #[serde(with = "decimal")]
        price: i64,
    }

    #[test]
    fn test_decimal_wire_format() {
        let priced: Priced = serde_json::from_str(r#"{"price":59.97}"#).unwrap();
        assert_eq!(priced.price, 5997);
        assert_eq!(serde_json::to_string(&priced).unwrap(), r#"{"price":59.97}"#);

        let whole: Priced = serde_json::from_str(r#"{"price":20}"#).unwrap();
        assert_eq!(whole.price, 2000);

        let negative: Priced = serde_json::from_str(r#"{"price":-0.5}"#).unwrap();
        assert_eq!(negative.price, -50);
    }

    #[test]
    fn test_decimal_rejects_out_of_range_and_non_numbers() {
        assert!(serde_json::from_str::<Priced>(r#"{"price":1e300}"#).is_err());
        assert!(serde_json::from_str::<Priced>(r#"{"price":"19.99"}"#).is_err());
    }
}
