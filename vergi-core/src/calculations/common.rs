//! Small decimal helpers shared by the calculators.
//!
//! The engine itself never rounds. [`round_half_up`] is for callers that
//! present or persist amounts in kuruş.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::InvalidInputError;

/// Rounds to two decimal places, with midpoints going away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use vergi_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(759.004)), dec!(759.00));
/// assert_eq!(round_half_up(dec!(15.0015)), dec!(15.00));
/// assert_eq!(round_half_up(dec!(40500.275)), dec!(40500.28));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two amounts.
///
/// ```
/// use rust_decimal_macros::dec;
/// use vergi_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-15000), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps an amount at zero from below.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// `a × b`, or [`InvalidInputError::AmountOutOfRange`] naming `field` on
/// overflow.
pub fn checked_mul(
    field: &'static str,
    a: Decimal,
    b: Decimal,
) -> Result<Decimal, InvalidInputError> {
    a.checked_mul(b).ok_or(InvalidInputError::AmountOutOfRange(field))
}

/// `a + b`, or [`InvalidInputError::AmountOutOfRange`] naming `field` on
/// overflow.
pub fn checked_add(
    field: &'static str,
    a: Decimal,
    b: Decimal,
) -> Result<Decimal, InvalidInputError> {
    a.checked_add(b).ok_or(InvalidInputError::AmountOutOfRange(field))
}
