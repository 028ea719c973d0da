//! Monthly payroll with R&D personnel incentives (5746/4691 regime).
//!
//! # Entry Structure
//!
//! | Step | Field | Formula |
//! |------|-------|---------|
//! | 1  | `sgk_worker_amount`            | gross × SGK worker rate |
//! | 2  | `unemployment_worker_amount`   | gross × unemployment worker rate |
//! | 3  | `income_tax_base`              | max(0, gross − Step 1 − Step 2) |
//! | 4  | `income_tax_gross`             | progressive tax on Step 3 |
//! | 5  | `income_tax_exemption_rate`    | table lookup by personnel profile |
//! | 6  | `income_tax_incentive_amount`  | Step 4 × Step 5 |
//! | 7  | `stamp_tax_amount`             | gross × stamp tax rate |
//! | 8  | `stamp_tax_incentive_amount`   | Step 7 for R&D personnel, else 0 |
//! | 9  | `sgk_employer_amount`          | gross × (employer rate + extra rate) |
//! | 10 | `sgk_employer_incentive_amount`| gross × employer rate × discount for R&D personnel, else 0 |
//! | 11 | `estimated_total_incentive`    | Step 6 + Step 8 + Step 10 |
//!
//! `net_salary` is the gross less the worker contributions and the income and
//! stamp tax that remain after incentives.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use vergi_core::calculations::PayrollCalculator;
//! use vergi_core::{EducationLevel, EmployeeProfile, GraduationField, PersonnelType, TaxParameters};
//!
//! let params = TaxParameters::default();
//! let calculator = PayrollCalculator::new(&params).unwrap();
//!
//! let profile = EmployeeProfile {
//!     gross_salary: dec!(100000),
//!     personnel_type: PersonnelType::RdPersonnel,
//!     education_level: EducationLevel::Bachelor,
//!     graduation_field: GraduationField::Other,
//! };
//! let entry = calculator.calculate_entry(&profile).unwrap();
//!
//! assert_eq!(entry.income_tax_base, dec!(85000));
//! assert_eq!(entry.income_tax_incentive_amount, dec!(10200));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::non_negative;
use crate::calculations::progressive::{IncomeTaxSchedule, calculate_progressive_tax};
use crate::error::{CalculationError, ConfigurationError, InvalidInputError};
use crate::models::{
    EmployeeProfile, ExemptionProfile, ExemptionRates, PayrollEntryResult, PeriodSummary,
    TaxParameters,
};

/// Returns the income tax exemption fraction for an employee.
///
/// Only R&D personnel qualify; everyone else gets zero without a table
/// lookup, as does R&D personnel without a degree.
///
/// # Errors
///
/// Returns [`ConfigurationError::MissingExemptionRate`] if the table has no
/// entry for the employee's profile.
pub fn income_tax_exemption_rate(
    profile: &EmployeeProfile,
    rates: &ExemptionRates,
) -> Result<Decimal, ConfigurationError> {
    if !profile.personnel_type.is_incentive_eligible() {
        return Ok(Decimal::ZERO);
    }

    match ExemptionProfile::classify(profile.education_level, profile.graduation_field) {
        Some(key) => rates
            .get(&key)
            .copied()
            .ok_or(ConfigurationError::MissingExemptionRate(key)),
        None => Ok(Decimal::ZERO),
    }
}

/// Sums a period's entries.
///
/// An empty period yields an all-zero summary.
pub fn aggregate_period(entries: &[PayrollEntryResult]) -> PeriodSummary {
    let mut summary = PeriodSummary {
        employee_count: entries.len(),
        ..PeriodSummary::default()
    };
    let mut total_sgk_employer = Decimal::ZERO;

    for entry in entries {
        summary.total_personnel_cost += entry.gross_salary;
        summary.total_incentive += entry.estimated_total_incentive;
        summary.total_income_tax_exemption += entry.income_tax_incentive_amount;
        summary.total_stamp_tax_exemption += entry.stamp_tax_incentive_amount;
        summary.total_sgk_employer_incentive += entry.sgk_employer_incentive_amount;
        total_sgk_employer += entry.sgk_employer_amount;
    }

    summary.payable_sgk = non_negative(total_sgk_employer - summary.total_sgk_employer_incentive);
    summary
}

/// Calculator for payroll entries against one validated parameter set.
#[derive(Debug, Clone, Copy)]
pub struct PayrollCalculator<'a> {
    params: &'a TaxParameters,
    schedule: IncomeTaxSchedule<'a>,
}

impl<'a> PayrollCalculator<'a> {
    /// Validates `params` and builds the calculator.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigurationError`] from [`TaxParameters::validate`].
    pub fn new(params: &'a TaxParameters) -> Result<Self, ConfigurationError> {
        params.validate()?;
        let schedule = IncomeTaxSchedule::new(&params.income_tax_brackets)?;
        Ok(Self { params, schedule })
    }

    /// Calculates one employee's entry for the period.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInput`] for a negative gross salary.
    pub fn calculate_entry(
        &self,
        profile: &EmployeeProfile,
    ) -> Result<PayrollEntryResult, CalculationError> {
        let gross = profile.gross_salary;
        if gross < Decimal::ZERO {
            return Err(InvalidInputError::NegativeGrossSalary(gross).into());
        }
        let eligible = profile.personnel_type.is_incentive_eligible();

        // Steps 1-3: worker contributions and the income tax base
        let sgk_worker_amount = gross * self.params.sgk_worker_rate;
        let unemployment_worker_amount = gross * self.params.unemployment_worker_rate;
        let income_tax_base = self.income_tax_base(gross, sgk_worker_amount, unemployment_worker_amount);

        // Steps 4-6: income tax and its exemption
        let income_tax_gross = calculate_progressive_tax(income_tax_base, &self.schedule);
        let income_tax_exemption_rate =
            income_tax_exemption_rate(profile, &self.params.exemption_rates)?;
        let income_tax_incentive_amount = income_tax_gross * income_tax_exemption_rate;

        // Steps 7-8: stamp tax is fully exempt for R&D personnel
        let stamp_tax_amount = gross * self.params.stamp_tax_rate;
        let stamp_tax_incentive_amount = if eligible {
            stamp_tax_amount
        } else {
            Decimal::ZERO
        };

        // Steps 9-10: the discount covers the base employer share only
        let sgk_employer_amount =
            gross * (self.params.sgk_employer_rate + self.params.sgk_employer_extra_rate);
        let sgk_employer_incentive_amount = if eligible {
            gross * self.params.sgk_employer_rate * self.params.sgk_employer_discount_rate
        } else {
            Decimal::ZERO
        };

        // Step 11
        let estimated_total_incentive =
            income_tax_incentive_amount + stamp_tax_incentive_amount + sgk_employer_incentive_amount;

        let net_salary = non_negative(
            gross
                - (sgk_worker_amount
                    + unemployment_worker_amount
                    + (income_tax_gross - income_tax_incentive_amount)
                    + (stamp_tax_amount - stamp_tax_incentive_amount)),
        );

        debug!(
            gross = %gross,
            personnel_type = profile.personnel_type.as_str(),
            income_tax_gross = %income_tax_gross,
            incentive = %estimated_total_incentive,
            "payroll entry calculated"
        );

        Ok(PayrollEntryResult {
            gross_salary: gross,
            sgk_worker_amount,
            unemployment_worker_amount,
            income_tax_base,
            income_tax_gross,
            income_tax_exemption_rate,
            income_tax_incentive_amount,
            stamp_tax_amount,
            stamp_tax_incentive_amount,
            net_salary,
            sgk_employer_amount,
            sgk_employer_incentive_amount,
            estimated_total_incentive,
        })
    }

    /// Calculates every entry of a period and sums them.
    ///
    /// # Errors
    ///
    /// Fails on the first employee whose entry cannot be calculated.
    pub fn calculate_period(
        &self,
        profiles: &[EmployeeProfile],
    ) -> Result<(Vec<PayrollEntryResult>, PeriodSummary), CalculationError> {
        let entries = profiles
            .iter()
            .map(|profile| self.calculate_entry(profile))
            .collect::<Result<Vec<_>, _>>()?;
        let summary = aggregate_period(&entries);
        Ok((entries, summary))
    }

    fn income_tax_base(
        &self,
        gross: Decimal,
        sgk_worker: Decimal,
        unemployment_worker: Decimal,
    ) -> Decimal {
        let base = gross - sgk_worker - unemployment_worker;
        if base <= Decimal::ZERO && gross > Decimal::ZERO {
            warn!(
                gross = %gross,
                "worker contributions consume the whole salary; income tax base is zero"
            );
        }
        non_negative(base)
    }
}
