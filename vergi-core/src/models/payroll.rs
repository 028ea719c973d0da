use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payroll figures for one employee in one period.
///
/// Every field is recomputed from the [`EmployeeProfile`](crate::EmployeeProfile)
/// and [`TaxParameters`](crate::TaxParameters); nothing carries over between
/// periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEntryResult {
    pub gross_salary: Decimal,

    // Worker side
    pub sgk_worker_amount: Decimal,
    pub unemployment_worker_amount: Decimal,
    pub income_tax_base: Decimal,
    pub income_tax_gross: Decimal,
    pub income_tax_exemption_rate: Decimal,
    pub income_tax_incentive_amount: Decimal,
    pub stamp_tax_amount: Decimal,
    pub stamp_tax_incentive_amount: Decimal,
    pub net_salary: Decimal,

    // Employer side
    pub sgk_employer_amount: Decimal,
    pub sgk_employer_incentive_amount: Decimal,

    pub estimated_total_incentive: Decimal,
}

/// Totals over all payroll entries of a period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub employee_count: usize,
    pub total_personnel_cost: Decimal,
    pub total_incentive: Decimal,
    pub total_income_tax_exemption: Decimal,
    pub total_stamp_tax_exemption: Decimal,
    pub total_sgk_employer_incentive: Decimal,

    /// Employer SGK still owed after the incentive, never negative.
    pub payable_sgk: Decimal,
}
