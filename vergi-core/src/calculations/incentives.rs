//! Technology development zone incentive helpers.
//!
//! | Helper | What it answers |
//! |--------|-----------------|
//! | [`venture_capital_obligation`] | How much must go to venture capital funds once the exemption base is large |
//! | [`CorporateTaxExemption::calculate`] | Corporate tax and VAT forgone on exempt R&D income |
//! | [`validate_support_personnel_ratio`] | Whether support staff headcount stays under its cap |
//! | [`remote_work_adjusted_incentive`] | How much income tax exemption survives a partly remote month |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::non_negative;
use crate::error::InvalidInputError;
use crate::models::{EmployeeProfile, PayrollEntryResult, PersonnelType, TaxParameters};

/// Returns the venture capital investment required for an exemption base.
///
/// Nothing is owed up to `venture_capital_limit`. Above it, the slice between
/// the limit and `venture_capital_max_amount` is charged at
/// `venture_capital_rate`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use vergi_core::TaxParameters;
/// use vergi_core::calculations::venture_capital_obligation;
///
/// let params = TaxParameters::default();
/// assert_eq!(venture_capital_obligation(dec!(10000000), &params), dec!(150000));
/// ```
pub fn venture_capital_obligation(
    exemption_base: Decimal,
    params: &TaxParameters,
) -> Decimal {
    if exemption_base <= params.venture_capital_limit {
        return Decimal::ZERO;
    }

    let excess = exemption_base - params.venture_capital_limit;
    let cap = params.venture_capital_max_amount - params.venture_capital_limit;
    non_negative(excess.min(cap)) * params.venture_capital_rate
}

/// Tax forgone on exempt income earned inside a technology development zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateTaxExemption {
    pub exempt_income: Decimal,
    pub rd_expense: Decimal,

    /// Exempt income net of R&D expense, floored at zero.
    pub exemption_base: Decimal,
    pub corporate_tax_exemption: Decimal,

    /// VAT the exempt sales would have carried at the standard rate.
    pub vat_exemption: Decimal,
    pub venture_capital_obligation: Decimal,
    pub venture_capital_required: bool,
}

impl CorporateTaxExemption {
    /// # Errors
    ///
    /// Returns [`InvalidInputError::NegativeAmount`] if either input is negative.
    pub fn calculate(
        exempt_income: Decimal,
        rd_expense: Decimal,
        params: &TaxParameters,
    ) -> Result<Self, InvalidInputError> {
        if exempt_income < Decimal::ZERO {
            return Err(InvalidInputError::NegativeAmount {
                field: "exempt_income",
                value: exempt_income,
            });
        }
        if rd_expense < Decimal::ZERO {
            return Err(InvalidInputError::NegativeAmount {
                field: "rd_expense",
                value: rd_expense,
            });
        }

        let exemption_base = non_negative(exempt_income - rd_expense);
        let corporate_tax_exemption = exemption_base * params.corporate_tax_rate;
        let vat_exemption = exempt_income * params.standard_vat_rate() / Decimal::ONE_HUNDRED;
        let venture_capital_obligation = venture_capital_obligation(exemption_base, params);

        debug!(
            exemption_base = %exemption_base,
            corporate_tax_exemption = %corporate_tax_exemption,
            venture_capital_obligation = %venture_capital_obligation,
            "corporate tax exemption calculated"
        );

        Ok(Self {
            exempt_income,
            rd_expense,
            exemption_base,
            corporate_tax_exemption,
            vat_exemption,
            venture_capital_obligation,
            venture_capital_required: venture_capital_obligation > Decimal::ZERO,
        })
    }
}

/// Checks that support staff do not exceed their allowed share of R&D staff.
///
/// Employees of type [`PersonnelType::Other`] are not counted.
///
/// # Errors
///
/// Returns [`InvalidInputError::SupportPersonnelRatioExceeded`] when support
/// headcount is above `support_personnel_max_ratio × R&D headcount`, including
/// any support staff at all when there is no R&D staff.
pub fn validate_support_personnel_ratio(
    employees: &[EmployeeProfile],
    params: &TaxParameters,
) -> Result<(), InvalidInputError> {
    let rd = employees
        .iter()
        .filter(|e| e.personnel_type == PersonnelType::RdPersonnel)
        .count();
    let support = employees
        .iter()
        .filter(|e| e.personnel_type == PersonnelType::Support)
        .count();

    let allowed = Decimal::from(rd) * params.support_personnel_max_ratio;
    if support > 0 && (rd == 0 || Decimal::from(support) > allowed) {
        return Err(InvalidInputError::SupportPersonnelRatioExceeded { support, rd });
    }
    Ok(())
}

/// Days worked in a period and how many of them were remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSchedule {
    pub days_worked: u32,
    pub remote_days: u32,
    pub is_informatics: bool,
}

impl WorkSchedule {
    pub fn office_only(days_worked: u32) -> Self {
        Self {
            days_worked,
            remote_days: 0,
            is_informatics: false,
        }
    }

    pub fn office_days(&self) -> u32 {
        self.days_worked.saturating_sub(self.remote_days)
    }
}

/// Share of the exemption kept on a remote day.
pub fn remote_work_rate(
    is_informatics: bool,
    params: &TaxParameters,
) -> Decimal {
    if is_informatics {
        params.remote_work_rate_informatics
    } else {
        params.remote_work_rate_other
    }
}

/// Scales an income tax incentive by the office/remote split of a period.
///
/// Office days keep the full amount; remote days keep `remote_work_rate` of
/// it. A schedule with no days worked leaves the amount unchanged.
///
/// ```
/// use rust_decimal_macros::dec;
/// use vergi_core::TaxParameters;
/// use vergi_core::calculations::{WorkSchedule, remote_work_adjusted_incentive};
///
/// let params = TaxParameters::default();
/// let schedule = WorkSchedule { days_worked: 20, remote_days: 10, is_informatics: false };
/// assert_eq!(
///     remote_work_adjusted_incentive(dec!(10200), &schedule, &params),
///     Ok(dec!(8925))
/// );
/// ```
///
/// # Errors
///
/// Returns [`InvalidInputError::RemoteDaysExceedDaysWorked`] when the schedule
/// has more remote days than days worked.
pub fn remote_work_adjusted_incentive(
    income_tax_incentive_amount: Decimal,
    schedule: &WorkSchedule,
    params: &TaxParameters,
) -> Result<Decimal, InvalidInputError> {
    if schedule.remote_days > schedule.days_worked {
        return Err(InvalidInputError::RemoteDaysExceedDaysWorked {
            remote_days: schedule.remote_days,
            days_worked: schedule.days_worked,
        });
    }
    if schedule.days_worked == 0 || schedule.remote_days == 0 {
        return Ok(income_tax_incentive_amount);
    }

    let rate = remote_work_rate(schedule.is_informatics, params);
    let weighted_days =
        Decimal::from(schedule.office_days()) + Decimal::from(schedule.remote_days) * rate;
    Ok(income_tax_incentive_amount * weighted_days / Decimal::from(schedule.days_worked))
}

/// Returns `entry` with its income tax incentive scaled for remote work.
///
/// The incentive total and the net salary follow the reduced amount.
///
/// # Errors
///
/// See [`remote_work_adjusted_incentive`].
pub fn apply_remote_work(
    entry: &PayrollEntryResult,
    schedule: &WorkSchedule,
    params: &TaxParameters,
) -> Result<PayrollEntryResult, InvalidInputError> {
    let adjusted =
        remote_work_adjusted_incentive(entry.income_tax_incentive_amount, schedule, params)?;
    let reduction = entry.income_tax_incentive_amount - adjusted;

    debug!(
        days_worked = schedule.days_worked,
        remote_days = schedule.remote_days,
        reduction = %reduction,
        "remote work applied to income tax incentive"
    );

    Ok(PayrollEntryResult {
        income_tax_incentive_amount: adjusted,
        estimated_total_incentive: entry.estimated_total_incentive - reduction,
        net_salary: non_negative(entry.net_salary - reduction),
        ..entry.clone()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{EducationLevel, GraduationField};

    fn staff(
        rd: usize,
        support: usize,
        other: usize,
    ) -> Vec<EmployeeProfile> {
        let employee = |personnel_type| EmployeeProfile {
            gross_salary: dec!(50000),
            personnel_type,
            education_level: EducationLevel::Bachelor,
            graduation_field: GraduationField::Other,
        };

        std::iter::repeat_n(PersonnelType::RdPersonnel, rd)
            .chain(std::iter::repeat_n(PersonnelType::Support, support))
            .chain(std::iter::repeat_n(PersonnelType::Other, other))
            .map(employee)
            .collect()
    }

    // =========================================================================
    // venture_capital_obligation tests
    // =========================================================================

    #[test]
    fn obligation_is_zero_up_to_limit() {
        let params = TaxParameters::default();

        assert_eq!(venture_capital_obligation(dec!(4000000), &params), dec!(0));
        assert_eq!(venture_capital_obligation(dec!(5000000), &params), dec!(0));
    }

    #[test]
    fn obligation_charges_excess_over_limit() {
        let params = TaxParameters::default();

        // (10M − 5M) × 0.03
        assert_eq!(venture_capital_obligation(dec!(10000000), &params), dec!(150000));
    }

    #[test]
    fn obligation_is_capped_at_max_amount() {
        let params = TaxParameters::default();

        // (100M − 5M) × 0.03
        assert_eq!(
            venture_capital_obligation(dec!(200000000), &params),
            dec!(2850000)
        );
    }

    // =========================================================================
    // CorporateTaxExemption tests
    // =========================================================================

    #[test]
    fn exemption_nets_rd_expense_from_income() {
        let params = TaxParameters::default();

        let result = CorporateTaxExemption::calculate(dec!(12000000), dec!(2000000), &params).unwrap();

        assert_eq!(
            result,
            CorporateTaxExemption {
                exempt_income: dec!(12000000),
                rd_expense: dec!(2000000),
                exemption_base: dec!(10000000),
                corporate_tax_exemption: dec!(2500000),
                vat_exemption: dec!(2400000),
                venture_capital_obligation: dec!(150000),
                venture_capital_required: true,
            }
        );
    }

    #[test]
    fn exemption_base_floors_at_zero() {
        let params = TaxParameters::default();

        let result = CorporateTaxExemption::calculate(dec!(100000), dec!(250000), &params).unwrap();

        assert_eq!(result.exemption_base, dec!(0));
        assert_eq!(result.corporate_tax_exemption, dec!(0));
        assert_eq!(result.vat_exemption, dec!(20000));
        assert!(!result.venture_capital_required);
    }

    #[test]
    fn exemption_rejects_negative_inputs() {
        let params = TaxParameters::default();

        assert_eq!(
            CorporateTaxExemption::calculate(dec!(-1), dec!(0), &params),
            Err(InvalidInputError::NegativeAmount {
                field: "exempt_income",
                value: dec!(-1),
            })
        );
        assert_eq!(
            CorporateTaxExemption::calculate(dec!(0), dec!(-1), &params),
            Err(InvalidInputError::NegativeAmount {
                field: "rd_expense",
                value: dec!(-1),
            })
        );
    }

    // =========================================================================
    // validate_support_personnel_ratio tests
    // =========================================================================

    #[test]
    fn ratio_accepts_support_within_cap() {
        let params = TaxParameters::default();

        assert_eq!(validate_support_personnel_ratio(&staff(20, 2, 5), &params), Ok(()));
    }

    #[test]
    fn ratio_rejects_support_above_cap() {
        let params = TaxParameters::default();

        assert_eq!(
            validate_support_personnel_ratio(&staff(20, 3, 0), &params),
            Err(InvalidInputError::SupportPersonnelRatioExceeded { support: 3, rd: 20 })
        );
    }

    #[test]
    fn ratio_rejects_support_without_rd_staff() {
        let params = TaxParameters::default();

        assert_eq!(
            validate_support_personnel_ratio(&staff(0, 1, 3), &params),
            Err(InvalidInputError::SupportPersonnelRatioExceeded { support: 1, rd: 0 })
        );
    }

    #[test]
    fn ratio_accepts_no_support_staff() {
        let params = TaxParameters::default();

        assert_eq!(validate_support_personnel_ratio(&[], &params), Ok(()));
        assert_eq!(validate_support_personnel_ratio(&staff(0, 0, 4), &params), Ok(()));
    }

    // =========================================================================
    // remote work tests
    // =========================================================================

    fn schedule(
        days_worked: u32,
        remote_days: u32,
        is_informatics: bool,
    ) -> WorkSchedule {
        WorkSchedule {
            days_worked,
            remote_days,
            is_informatics,
        }
    }

    #[test]
    fn remote_days_keep_the_other_rate() {
        let params = TaxParameters::default();

        // 10200 × (10 + 10 × 0.75) / 20
        assert_eq!(
            remote_work_adjusted_incentive(dec!(10200), &schedule(20, 10, false), &params),
            Ok(dec!(8925))
        );
        // 10200 × 0.75
        assert_eq!(
            remote_work_adjusted_incentive(dec!(10200), &schedule(20, 20, false), &params),
            Ok(dec!(7650))
        );
    }

    #[test]
    fn informatics_personnel_keep_full_amount_remotely() {
        let params = TaxParameters::default();

        assert_eq!(
            remote_work_adjusted_incentive(dec!(10200), &schedule(22, 15, true), &params),
            Ok(dec!(10200))
        );
    }

    #[test]
    fn office_only_schedule_is_unchanged() {
        let params = TaxParameters::default();

        assert_eq!(
            remote_work_adjusted_incentive(dec!(10200), &WorkSchedule::office_only(22), &params),
            Ok(dec!(10200))
        );
        assert_eq!(
            remote_work_adjusted_incentive(dec!(10200), &WorkSchedule::office_only(0), &params),
            Ok(dec!(10200))
        );
    }

    #[test]
    fn remote_days_above_days_worked_are_rejected() {
        let params = TaxParameters::default();

        assert_eq!(
            remote_work_adjusted_incentive(dec!(10200), &schedule(10, 11, false), &params),
            Err(InvalidInputError::RemoteDaysExceedDaysWorked {
                remote_days: 11,
                days_worked: 10,
            })
        );
    }

    #[test]
    fn remote_work_rate_reads_parameters() {
        let params = TaxParameters {
            remote_work_rate_other: dec!(0.5),
            ..TaxParameters::default()
        };

        assert_eq!(remote_work_rate(true, &params), dec!(1));
        assert_eq!(remote_work_rate(false, &params), dec!(0.5));
        // 10200 × (15 + 5 × 0.5) / 20
        assert_eq!(
            remote_work_adjusted_incentive(dec!(10200), &schedule(20, 5, false), &params),
            Ok(dec!(8925))
        );
    }

    #[test]
    fn apply_remote_work_moves_totals_with_incentive() {
        let params = TaxParameters::default();
        let calculator = crate::calculations::PayrollCalculator::new(&params).unwrap();
        let entry = calculator
            .calculate_entry(&EmployeeProfile {
                gross_salary: dec!(100000),
                personnel_type: PersonnelType::RdPersonnel,
                education_level: EducationLevel::Bachelor,
                graduation_field: GraduationField::Other,
            })
            .unwrap();

        let adjusted = apply_remote_work(&entry, &schedule(20, 10, false), &params).unwrap();

        assert_eq!(adjusted.income_tax_incentive_amount, dec!(8925));
        assert_eq!(adjusted.estimated_total_incentive, dec!(19934));
        assert_eq!(adjusted.net_salary, dec!(81175));
        assert_eq!(adjusted.income_tax_gross, entry.income_tax_gross);
        assert_eq!(adjusted.stamp_tax_incentive_amount, entry.stamp_tax_incentive_amount);
    }
}
