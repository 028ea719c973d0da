//! The single configuration record consumed by every calculator.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::progressive::IncomeTaxSchedule;
use crate::error::ConfigurationError;
use crate::models::{ExemptionProfile, IncomeTaxBracket, default_income_tax_brackets};

/// Income tax exemption fraction per education/field profile.
pub type ExemptionRates = BTreeMap<ExemptionProfile, Decimal>;

/// Rates, limits and tables for one fiscal year.
///
/// The [`Default`] value carries the shipped 2026 figures. When deserialized,
/// every key that is absent falls back to that default, so a parameter file
/// only needs to list what it changes. Call [`TaxParameters::validate`] before
/// handing a deserialized value to a calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxParameters {
    pub year: i32,

    /// Allowed VAT percentages.
    pub vat_rates: Vec<Decimal>,

    /// Allowed withholding fractions ("k/10" of the VAT amount).
    pub withholding_fractions: Vec<Decimal>,

    pub income_tax_brackets: Vec<IncomeTaxBracket>,
    pub exemption_rates: ExemptionRates,

    pub sgk_worker_rate: Decimal,
    pub unemployment_worker_rate: Decimal,
    pub sgk_employer_rate: Decimal,

    /// Employer unemployment insurance share, charged on top of
    /// `sgk_employer_rate` but not covered by the incentive.
    pub sgk_employer_extra_rate: Decimal,

    /// Share of the base employer SGK contribution covered for R&D personnel.
    pub sgk_employer_discount_rate: Decimal,

    pub stamp_tax_rate: Decimal,

    pub corporate_tax_rate: Decimal,
    pub venture_capital_limit: Decimal,
    pub venture_capital_rate: Decimal,
    pub venture_capital_max_amount: Decimal,

    /// Support staff may not exceed this fraction of R&D staff.
    pub support_personnel_max_ratio: Decimal,

    /// Share of the income tax exemption kept on remote days, for
    /// informatics personnel and everyone else respectively.
    pub remote_work_rate_informatics: Decimal,
    pub remote_work_rate_other: Decimal,
}

impl Default for TaxParameters {
    fn default() -> Self {
        Self {
            year: 2026,
            vat_rates: vec![
                Decimal::ZERO,
                Decimal::ONE,
                Decimal::TEN,
                Decimal::from(20),
            ],
            withholding_fractions: vec![
                Decimal::ZERO,
                Decimal::new(2, 1),
                Decimal::new(3, 1),
                Decimal::new(4, 1),
                Decimal::new(5, 1),
                Decimal::new(7, 1),
                Decimal::new(9, 1),
            ],
            income_tax_brackets: default_income_tax_brackets(),
            exemption_rates: default_exemption_rates(),
            sgk_worker_rate: Decimal::new(14, 2),
            unemployment_worker_rate: Decimal::new(1, 2),
            sgk_employer_rate: Decimal::new(205, 3),
            sgk_employer_extra_rate: Decimal::new(2, 2),
            sgk_employer_discount_rate: Decimal::new(5, 1),
            stamp_tax_rate: Decimal::new(759, 5),
            corporate_tax_rate: Decimal::new(25, 2),
            venture_capital_limit: Decimal::from(5_000_000),
            venture_capital_rate: Decimal::new(3, 2),
            venture_capital_max_amount: Decimal::from(100_000_000),
            support_personnel_max_ratio: Decimal::new(10, 2),
            remote_work_rate_informatics: Decimal::ONE,
            remote_work_rate_other: Decimal::new(75, 2),
        }
    }
}

/// Exemption fractions shipped with the default parameters.
pub fn default_exemption_rates() -> ExemptionRates {
    BTreeMap::from([
        (ExemptionProfile::Phd, Decimal::new(95, 2)),
        (ExemptionProfile::MasterBasicSciences, Decimal::new(95, 2)),
        (ExemptionProfile::MasterOther, Decimal::new(90, 2)),
        (ExemptionProfile::BachelorBasicSciences, Decimal::new(90, 2)),
        (ExemptionProfile::BachelorOther, Decimal::new(80, 2)),
    ])
}

impl TaxParameters {
    /// Checks every table and rate.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found:
    /// - an allowed VAT rate or withholding set is empty or out of range
    /// - the bracket table is not a valid partition of `[0, ∞)`
    /// - an exemption profile has no rate, or a rate is outside `[0, 1]`
    /// - a contribution/tax rate is outside `[0, 1]`
    /// - the venture capital limit exceeds its maximum amount
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.vat_rates.is_empty() {
            return Err(ConfigurationError::EmptyAllowedSet("VAT rate"));
        }
        if let Some(rate) = self
            .vat_rates
            .iter()
            .find(|rate| **rate < Decimal::ZERO || **rate > Decimal::ONE_HUNDRED)
        {
            return Err(ConfigurationError::VatRateOutOfRange(*rate));
        }

        if self.withholding_fractions.is_empty() {
            return Err(ConfigurationError::EmptyAllowedSet("withholding fraction"));
        }
        for fraction in &self.withholding_fractions {
            check_fraction("withholding fraction", *fraction)?;
        }

        IncomeTaxSchedule::new(&self.income_tax_brackets)?;

        for profile in ExemptionProfile::ALL {
            let rate = self
                .exemption_rates
                .get(&profile)
                .ok_or(ConfigurationError::MissingExemptionRate(profile))?;
            check_fraction("income tax exemption rate", *rate)?;
        }

        check_fraction("sgk_worker_rate", self.sgk_worker_rate)?;
        check_fraction("unemployment_worker_rate", self.unemployment_worker_rate)?;
        check_fraction("sgk_employer_rate", self.sgk_employer_rate)?;
        check_fraction("sgk_employer_extra_rate", self.sgk_employer_extra_rate)?;
        check_fraction("sgk_employer_discount_rate", self.sgk_employer_discount_rate)?;
        check_fraction("stamp_tax_rate", self.stamp_tax_rate)?;
        check_fraction("corporate_tax_rate", self.corporate_tax_rate)?;
        check_fraction("venture_capital_rate", self.venture_capital_rate)?;
        check_fraction("support_personnel_max_ratio", self.support_personnel_max_ratio)?;
        check_fraction("remote_work_rate_informatics", self.remote_work_rate_informatics)?;
        check_fraction("remote_work_rate_other", self.remote_work_rate_other)?;

        if self.venture_capital_limit > self.venture_capital_max_amount {
            return Err(ConfigurationError::VentureCapitalLimitAboveMax {
                limit: self.venture_capital_limit,
                max_amount: self.venture_capital_max_amount,
            });
        }

        Ok(())
    }

    pub fn is_allowed_vat_rate(
        &self,
        rate: Decimal,
    ) -> bool {
        self.vat_rates.contains(&rate)
    }

    pub fn is_allowed_withholding_fraction(
        &self,
        fraction: Decimal,
    ) -> bool {
        self.withholding_fractions.contains(&fraction)
    }

    /// The highest allowed VAT rate, used as the rate an exempt sale would
    /// otherwise have carried.
    pub fn standard_vat_rate(&self) -> Decimal {
        self.vat_rates
            .iter()
            .copied()
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

fn check_fraction(
    name: &'static str,
    value: Decimal,
) -> Result<(), ConfigurationError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ConfigurationError::RateOutOfRange { name, value });
    }
    Ok(())
}
