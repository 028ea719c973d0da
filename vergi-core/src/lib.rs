//! Tax calculation engine for Turkish invoices and R&D payroll.
//!
//! [`models`] holds the input/output records and [`TaxParameters`];
//! [`calculations`] holds the calculators that turn one into the other.

pub mod calculations;
pub mod error;
pub mod models;

pub use error::{CalculationError, ConfigurationError, InvalidInputError};
pub use models::*;
