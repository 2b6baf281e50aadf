//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The dashboard used to sum parseFloat(order.total) values:              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Splitting a 100₫ discount three ways:                                 │
//! │    33 + 33 + 33 = 99  → Lost 1₫!                                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer units + explicit rounding                        │
//! │    Every division goes through round-half-up and the caller decides    │
//! │    where the leftover unit lands (see discount.rs)                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Currency Unit
//! Values are stored in the smallest unit of the store currency. The stores
//! this engine reports on price in VND, which has no subunit, so one unit is
//! one đồng.
//!
//! ## Usage
//! ```rust
//! use titan_core::money::Money;
//!
//! let price = Money::from_units(35_000);
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total.units(), 105_000);
//!
//! // Raw records carry decimal strings
//! assert_eq!(Money::parse_decimal("1000.50"), Some(Money::from_units(1001)));
//! assert_eq!(Money::parse_decimal("abc"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Rounding
// =============================================================================

/// Divides `numerator / denominator` rounding half up (towards +∞ on .5).
///
/// This is the integer form of `Math.round(n / d)`: `floor(n / d + 1/2)`.
/// A zero denominator yields zero; callers that care check first.
///
/// ## Example
/// ```rust
/// use titan_core::money::round_half_up_div;
///
/// assert_eq!(round_half_up_div(27, 1), 27);
/// assert_eq!(round_half_up_div(5, 2), 3);   // 2.5 → 3
/// assert_eq!(round_half_up_div(-5, 2), -2); // -2.5 → -2
/// assert_eq!(round_half_up_div(7, 0), 0);
/// ```
pub fn round_half_up_div(numerator: i128, denominator: i128) -> i128 {
    if denominator == 0 {
        return 0;
    }

    // Normalise so the divisor is positive; floor division is then exact
    let (n, d) = if denominator < 0 {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };

    let (quotient, remainder) = (n.div_euclid(d), n.rem_euclid(d));
    if remainder >= d - remainder {
        quotient + 1
    } else {
        quotient
    }
}

/// Narrows an i128 intermediate back to i64, clamping at the bounds.
fn clamp_to_i64(value: i128) -> i64 {
    value.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: `revenue = total − tax` may go negative on bad data
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support; serialises as a plain number
/// - **Saturating arithmetic**: `+`, `-` and `×` clamp at the i64 bounds
///   instead of panicking or wrapping on hostile input
///
/// ## Where Money Is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  RawOrder.total ("1000.00") ──► Order.total ──► revenue() ──► snapshot  │
/// │                                                                         │
/// │  OrderItem.unit_price × quantity ──► line_total ──► allocation          │
/// │                                                                         │
/// │  EVERY monetary value in the report flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use titan_core::money::Money;
    ///
    /// let price = Money::from_units(35_000);
    /// assert_eq!(price.units(), 35_000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in the smallest currency unit.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use titan_core::money::Money;
    ///
    /// let unit_price = Money::from_units(300);
    /// assert_eq!(unit_price.multiply_quantity(3).units(), 900);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `self × part / whole`, rounded half up.
    ///
    /// This is the proportional share used by discount allocation. A zero
    /// `whole` yields zero.
    ///
    /// ## Example
    /// ```rust
    /// use titan_core::money::Money;
    ///
    /// let discount = Money::from_units(90);
    /// let share = discount.pro_rata(Money::from_units(300), Money::from_units(1000));
    /// assert_eq!(share.units(), 27);
    /// ```
    pub fn pro_rata(&self, part: Money, whole: Money) -> Money {
        let share = round_half_up_div(self.0 as i128 * part.0 as i128, whole.0 as i128);
        Money(clamp_to_i64(share))
    }

    /// Divides by an integer count, rounded half up.
    ///
    /// Used for the daily average. A zero divisor yields zero.
    pub fn div_round(&self, divisor: i64) -> Money {
        Money(clamp_to_i64(round_half_up_div(self.0 as i128, divisor as i128)))
    }

    /// Returns this amount as a whole percentage of `whole`, rounded half up.
    ///
    /// ## Example
    /// ```rust
    /// use titan_core::money::Money;
    ///
    /// let part = Money::from_units(300);
    /// assert_eq!(part.percentage_of(Money::from_units(1000)), 30);
    /// assert_eq!(part.percentage_of(Money::zero()), 0);
    /// ```
    pub fn percentage_of(&self, whole: Money) -> i64 {
        clamp_to_i64(round_half_up_div(self.0 as i128 * 100, whole.0 as i128))
    }

    /// Parses a decimal string such as `"1000"`, `"1000.00"` or `"-12.5"`.
    ///
    /// Fractions are rounded half away from zero to the whole unit. Returns
    /// `None` for anything that is not a plain decimal number; the normaliser
    /// turns that into zero.
    pub fn parse_decimal(raw: &str) -> Option<Money> {
        let raw = raw.trim();
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let mut units: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        if fraction.chars().next().is_some_and(|c| c >= '5') {
            units = units.checked_add(1)?;
        }

        Some(Money(if negative { -units } else { units }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats like the vi-VN currency formatter: `1.250.000 ₫`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{} ₫", sign, grouped)
    }
}

/// Default money is zero.
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
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_div() {
        assert_eq!(round_half_up_div(10, 4), 3); // 2.5 → 3
        assert_eq!(round_half_up_div(9, 4), 2); // 2.25 → 2
        assert_eq!(round_half_up_div(11, 4), 3); // 2.75 → 3
        assert_eq!(round_half_up_div(-10, 4), -2); // -2.5 → -2 (Math.round)
        assert_eq!(round_half_up_div(-11, 4), -3);
        assert_eq!(round_half_up_div(10, -4), -2);
        assert_eq!(round_half_up_div(1, 0), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(0).to_string(), "0 ₫");
        assert_eq!(Money::from_units(999).to_string(), "999 ₫");
        assert_eq!(Money::from_units(1000).to_string(), "1.000 ₫");
        assert_eq!(Money::from_units(1_250_000).to_string(), "1.250.000 ₫");
        assert_eq!(Money::from_units(-45_000).to_string(), "-45.000 ₫");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(100);

        assert_eq!((a + b).units(), 1100);
        assert_eq!((a - b).units(), 900);
        assert_eq!((a * 3).units(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_units(50);
        assert_eq!(c.units(), 1050);
    }

    #[test]
    fn test_arithmetic_saturates_at_bounds() {
        let max = Money::from_units(i64::MAX);
        let min = Money::from_units(i64::MIN);

        assert_eq!(max + Money::from_units(1), max);
        assert_eq!(min - Money::from_units(1), min);
        assert_eq!(max - Money::from_units(-1), max);
        assert_eq!(Money::from_units(5_000_000_000_000).multiply_quantity(4_000_000), max);
        assert_eq!(Money::from_units(-5_000_000_000_000) * 4_000_000, min);
        assert_eq!(min.abs(), max);

        let mut acc = max;
        acc += max;
        assert_eq!(acc, max);
        acc -= min;
        assert_eq!(acc, max);

        let total: Money = [max, max, Money::from_units(-1)].into_iter().sum();
        assert_eq!(total, Money::from_units(i64::MAX - 1));

        assert_eq!(max.percentage_of(Money::from_units(1)), i64::MAX);
        assert_eq!(max.pro_rata(max, Money::from_units(1)), max);
        assert_eq!(min.pro_rata(min, Money::from_units(1)), max);
    }

    #[test]
    fn test_sum() {
        let values = [Money::from_units(100), Money::from_units(300), Money::from_units(600)];
        let by_ref: Money = values.iter().sum();
        let by_value: Money = values.into_iter().sum();
        assert_eq!(by_ref, Money::from_units(1000));
        assert_eq!(by_value, by_ref);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("1000"), Some(Money::from_units(1000)));
        assert_eq!(Money::parse_decimal("1000.00"), Some(Money::from_units(1000)));
        assert_eq!(Money::parse_decimal(" 1000.49 "), Some(Money::from_units(1000)));
        assert_eq!(Money::parse_decimal("1000.5"), Some(Money::from_units(1001)));
        assert_eq!(Money::parse_decimal("-12.5"), Some(Money::from_units(-13)));
        assert_eq!(Money::parse_decimal("+7"), Some(Money::from_units(7)));
        assert_eq!(Money::parse_decimal(".9"), Some(Money::from_units(1)));

        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("."), None);
        assert_eq!(Money::parse_decimal("abc"), None);
        assert_eq!(Money::parse_decimal("12a"), None);
        assert_eq!(Money::parse_decimal("1.2.3"), None);
        assert_eq!(Money::parse_decimal("99999999999999999999"), None);
    }

    #[test]
    fn test_pro_rata() {
        let discount = Money::from_units(90);
        assert_eq!(
            discount.pro_rata(Money::from_units(300), Money::from_units(1000)),
            Money::from_units(27)
        );
        // 100 × 1/3 = 33.33 → 33
        assert_eq!(
            Money::from_units(100).pro_rata(Money::from_units(1), Money::from_units(3)),
            Money::from_units(33)
        );
        assert_eq!(discount.pro_rata(Money::from_units(1), Money::zero()), Money::zero());
    }

    #[test]
    fn test_div_round_and_percentage() {
        assert_eq!(Money::from_units(1000).div_round(3), Money::from_units(333));
        assert_eq!(Money::from_units(1001).div_round(2), Money::from_units(501));
        assert_eq!(Money::from_units(1000).div_round(0), Money::zero());

        assert_eq!(Money::from_units(600).percentage_of(Money::from_units(1000)), 60);
        assert_eq!(Money::from_units(1).percentage_of(Money::from_units(3)), 33);
        assert_eq!(Money::from_units(2).percentage_of(Money::from_units(3)), 67);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_units(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().units(), 100);
    }
}
