//! Error types shared by the invoice and payroll calculators.
//!
//! Errors are split by who has to fix them. [`InvalidInputError`] means a
//! record handed to a calculator is wrong and the caller must correct it.
//! [`ConfigurationError`] means the [`TaxParameters`](crate::TaxParameters)
//! themselves are unusable; these are normally surfaced once, when the
//! parameters are loaded and validated, rather than during a calculation.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::ExemptionProfile;

/// A calculation input that the engine refuses to process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("quantity must be non-negative, got {0}")]
    NegativeQuantity(Decimal),

    #[error("unit price must be non-negative, got {0}")]
    NegativeUnitPrice(Decimal),

    #[error("gross salary must be non-negative, got {0}")]
    NegativeGrossSalary(Decimal),

    #[error("VAT rate {0}% is not one of the allowed rates")]
    DisallowedVatRate(Decimal),

    #[error("withholding fraction {0} is not one of the allowed fractions")]
    DisallowedWithholdingFraction(Decimal),

    #[error("discount must be between 0 and 1, got {0}")]
    InvalidDiscount(Decimal),

    #[error("exempt line is missing its exemption code")]
    MissingExemptionCode,

    #[error("{inputs} line inputs but {results} line results")]
    LineCountMismatch { inputs: usize, results: usize },

    #[error("{support} support personnel exceeds the allowed share of {rd} R&D personnel")]
    SupportPersonnelRatioExceeded { support: usize, rd: usize },

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("{0} is too large to represent")]
    AmountOutOfRange(&'static str),

    #[error("{remote_days} remote days exceed {days_worked} days worked")]
    RemoteDaysExceedDaysWorked { remote_days: u32, days_worked: u32 },
}

/// The tax parameter set is inconsistent and cannot drive a calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no income tax brackets provided")]
    NoTaxBrackets,

    #[error("income tax bracket limits must be strictly ascending, {limit} follows {previous}")]
    BracketsNotAscending { previous: Decimal, limit: Decimal },

    #[error("the last income tax bracket must be unbounded")]
    MissingUnboundedBracket,

    #[error("only the last income tax bracket may be unbounded (bracket {0} is unbounded)")]
    UnboundedBracketNotLast(usize),

    #[error("income tax bracket limit must be positive, got {0}")]
    NonPositiveBracketLimit(Decimal),

    #[error("no exemption rate configured for profile '{}'", .0.as_str())]
    MissingExemptionRate(ExemptionProfile),

    #[error("{name} must be between 0 and 1, got {value}")]
    RateOutOfRange { name: &'static str, value: Decimal },

    #[error("VAT rate {0}% must be between 0 and 100")]
    VatRateOutOfRange(Decimal),

    #[error("the allowed {0} set is empty")]
    EmptyAllowedSet(&'static str),

    #[error("venture capital limit {limit} exceeds its maximum amount {max_amount}")]
    VentureCapitalLimitAboveMax { limit: Decimal, max_amount: Decimal },
}

/// Either kind of failure, for operations that can hit both.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
