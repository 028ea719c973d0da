//! Invoice, payroll and incentive calculators.
//!
//! Every calculator borrows a [`TaxParameters`](crate::TaxParameters) and is a
//! pure function of its inputs.

pub mod common;
pub mod incentives;
pub mod invoice;
pub mod payroll;
pub mod progressive;

pub use incentives::{
    CorporateTaxExemption, WorkSchedule, apply_remote_work, remote_work_adjusted_incentive,
    remote_work_rate, validate_support_personnel_ratio, venture_capital_obligation,
};
pub use invoice::InvoiceCalculator;
pub use payroll::{PayrollCalculator, aggregate_period, income_tax_exemption_rate};
pub use progressive::{IncomeTaxSchedule, calculate_progressive_tax};
