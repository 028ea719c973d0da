//! Progressive income tax over a bracket schedule.
//!
//! The schedule is a list of upper limits with a marginal rate each. Tax is
//! accumulated slice by slice: each bounded bracket taxes at most
//! `upper_limit − previous_limit` of the remaining base, and the final
//! unbounded bracket taxes whatever is left.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use vergi_core::calculations::{IncomeTaxSchedule, calculate_progressive_tax};
//! use vergi_core::default_income_tax_brackets;
//!
//! let brackets = default_income_tax_brackets();
//! let schedule = IncomeTaxSchedule::new(&brackets).unwrap();
//!
//! // 110,000 × 15% + 120,000 × 20% + 1 × 27%
//! assert_eq!(calculate_progressive_tax(dec!(230001), &schedule), dec!(40500.27));
//! ```

use rust_decimal::Decimal;

use crate::error::ConfigurationError;
use crate::models::IncomeTaxBracket;

/// A bracket table that has been checked to partition `[0, ∞)`.
///
/// Construction is the only place the ordering rules are enforced, so a
/// calculation never has to handle a malformed table.
#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxSchedule<'a> {
    brackets: &'a [IncomeTaxBracket],
}

impl<'a> IncomeTaxSchedule<'a> {
    /// Validates `brackets` and wraps them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if:
    /// - the table is empty
    /// - a bounded limit is not positive or not strictly above the previous one
    /// - an unbounded bracket appears before the end
    /// - the last bracket is bounded
    /// - a rate is outside `[0, 1]`
    pub fn new(brackets: &'a [IncomeTaxBracket]) -> Result<Self, ConfigurationError> {
        if brackets.is_empty() {
            return Err(ConfigurationError::NoTaxBrackets);
        }

        let last = brackets.len() - 1;
        let mut previous: Option<Decimal> = None;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(ConfigurationError::RateOutOfRange {
                    name: "income tax bracket rate",
                    value: bracket.rate,
                });
            }

            match bracket.upper_limit {
                None if index != last => {
                    return Err(ConfigurationError::UnboundedBracketNotLast(index));
                }
                None => {}
                Some(_) if index == last => {
                    return Err(ConfigurationError::MissingUnboundedBracket);
                }
                Some(limit) => {
                    if limit <= Decimal::ZERO {
                        return Err(ConfigurationError::NonPositiveBracketLimit(limit));
                    }
                    if let Some(previous) = previous {
                        if limit <= previous {
                            return Err(ConfigurationError::BracketsNotAscending {
                                previous,
                                limit,
                            });
                        }
                    }
                    previous = Some(limit);
                }
            }
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &'a [IncomeTaxBracket] {
        self.brackets
    }
}

/// Computes income tax on `base` using the marginal rates of `schedule`.
///
/// A base of zero or less yields zero without consulting the table. The
/// result is not rounded; rounding belongs to whoever presents it.
pub fn calculate_progressive_tax(
    base: Decimal,
    schedule: &IncomeTaxSchedule<'_>,
) -> Decimal {
    if base <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut remaining = base;
    let mut previous_limit = Decimal::ZERO;
    let mut total_tax = Decimal::ZERO;

    for bracket in schedule.brackets() {
        let taxable = match bracket.upper_limit {
            Some(limit) => remaining.min(limit - previous_limit),
            None => remaining,
        };

        total_tax += taxable * bracket.rate;
        remaining -= taxable;

        if remaining <= Decimal::ZERO {
            break;
        }

        if let Some(limit) = bracket.upper_limit {
            previous_limit = limit;
        }
    }

    total_tax
}
