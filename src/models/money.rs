//! Numeric helpers shared by every calculation step.
//!
//! Optional money and fraction fields are read through [`OrZero`] so the
//! absent-means-zero policy lives in one place.

use rust_decimal::Decimal;

/// Reads an optional numeric field, treating an absent value as zero.
///
/// # Example
///
/// ```
/// use physician_comp_engine::models::OrZero;
/// use rust_decimal::Decimal;
///
/// let salary: Option<Decimal> = None;
/// assert_eq!(salary.or_zero(), Decimal::ZERO);
/// assert_eq!(Some(Decimal::ONE).or_zero(), Decimal::ONE);
/// ```
pub trait OrZero {
    /// Returns the contained value, or zero when absent.
    fn or_zero(self) -> Decimal;
}

impl OrZero for Option<Decimal> {
    fn or_zero(self) -> Decimal {
        self.unwrap_or(Decimal::ZERO)
    }
}

impl OrZero for Option<&Decimal> {
    fn or_zero(self) -> Decimal {
        self.copied().unwrap_or(Decimal::ZERO)
    }
}

/// Clamps a value at zero from below.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Clamps a fraction into `[0, 1]`.
pub fn clamp_fraction(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(Decimal::ONE)
}

/// Returns the divisor to use for a proportional split.
///
/// A zero total is replaced by one so every share comes out as zero.
pub fn safe_divisor(total: Decimal) -> Decimal {
    if total.is_zero() { Decimal::ONE } else { total }
}

/// Returns `Some(value)` only when the value is nonzero.
pub fn nonzero(value: Decimal) -> Option<Decimal> {
    if value.is_zero() { None } else { Some(value) }
}
