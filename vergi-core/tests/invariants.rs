//! Property tests over randomly generated invoices and payrolls.

use proptest::prelude::*;
use rust_decimal::Decimal;

use vergi_core::calculations::{
    IncomeTaxSchedule, InvoiceCalculator, PayrollCalculator, aggregate_period,
    calculate_progressive_tax,
};
use vergi_core::{
    EducationLevel, EmployeeProfile, GraduationField, InvoiceLineInput, PersonnelType,
    TaxParameters, default_income_tax_brackets,
};

fn amount(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

fn invoice_line() -> impl Strategy<Value = InvoiceLineInput> {
    let params = TaxParameters::default();
    (
        amount(100_000),
        amount(10_000_000),
        prop::sample::select(params.vat_rates),
        prop::sample::select(params.withholding_fractions),
        (0..=100i64).prop_map(|pct| Decimal::new(pct, 2)),
        any::<bool>(),
    )
        .prop_map(|(quantity, unit_price, vat_rate, withholding, discount, exempt)| {
            let line = if exempt {
                InvoiceLineInput::exempt(quantity, unit_price, "351")
            } else {
                InvoiceLineInput::taxable(quantity, unit_price, vat_rate)
            };
            line.with_withholding(withholding).with_discount(discount)
        })
}

fn employee() -> impl Strategy<Value = EmployeeProfile> {
    (
        amount(200_000_000),
        prop_oneof![
            Just(PersonnelType::RdPersonnel),
            Just(PersonnelType::Support),
            Just(PersonnelType::Other),
        ],
        prop_oneof![
            Just(EducationLevel::None),
            Just(EducationLevel::Bachelor),
            Just(EducationLevel::Master),
            Just(EducationLevel::Phd),
        ],
        prop_oneof![Just(GraduationField::BasicSciences), Just(GraduationField::Other)],
    )
        .prop_map(
            |(gross_salary, personnel_type, education_level, graduation_field)| EmployeeProfile {
                gross_salary,
                personnel_type,
                education_level,
                graduation_field,
            },
        )
}

// =============================================================================
// Invoice properties
// =============================================================================

proptest! {
    #[test]
    fn line_total_identity_holds(line in invoice_line()) {
        let params = TaxParameters::default();
        let result = InvoiceCalculator::new(&params).calculate_line(&line).unwrap();

        prop_assert_eq!(
            result.total_with_vat,
            result.discounted_total + result.vat_amount - result.withholding_amount
        );
        prop_assert!(result.vat_amount >= Decimal::ZERO);
        prop_assert!(result.withholding_amount <= result.vat_amount);
        prop_assert!(result.discounted_total <= result.line_total);
    }

    #[test]
    fn exempt_lines_carry_no_vat(line in invoice_line()) {
        prop_assume!(line.is_exempt);
        let params = TaxParameters::default();
        let result = InvoiceCalculator::new(&params).calculate_line(&line).unwrap();

        prop_assert_eq!(result.vat_amount, Decimal::ZERO);
        prop_assert_eq!(result.withholding_amount, Decimal::ZERO);
    }

    #[test]
    fn document_totals_match_line_totals(lines in prop::collection::vec(invoice_line(), 0..12)) {
        let params = TaxParameters::default();
        let calculator = InvoiceCalculator::new(&params);
        let document = calculator.calculate_document(&lines).unwrap();

        let line_sum: Decimal = lines
            .iter()
            .map(|line| calculator.calculate_line(line).unwrap().total_with_vat)
            .sum();

        prop_assert_eq!(document.grand_total, line_sum);
        prop_assert_eq!(document.subtotal, document.exempt_amount + document.taxable_amount);
        let gross_sum: Decimal = lines.iter().map(|line| line.quantity * line.unit_price).sum();
        prop_assert_eq!(document.subtotal + document.discount_amount, gross_sum);
        prop_assert_eq!(
            document.grand_total,
            document.subtotal + document.vat_amount - document.withholding_amount
        );
    }

    #[test]
    fn document_calculation_is_idempotent(lines in prop::collection::vec(invoice_line(), 0..8)) {
        let params = TaxParameters::default();
        let calculator = InvoiceCalculator::new(&params);

        prop_assert_eq!(
            calculator.calculate_document(&lines).unwrap(),
            calculator.calculate_document(&lines).unwrap()
        );
    }

    #[test]
    fn raising_unit_price_never_lowers_line_total(
        line in invoice_line(),
        bump in amount(1_000_000),
    ) {
        let params = TaxParameters::default();
        let calculator = InvoiceCalculator::new(&params);
        let mut higher = line.clone();
        higher.unit_price += bump;

        let base = calculator.calculate_line(&line).unwrap();
        let raised = calculator.calculate_line(&higher).unwrap();

        prop_assert!(raised.total_with_vat >= base.total_with_vat);
    }
}

// =============================================================================
// Progressive tax properties
// =============================================================================

proptest! {
    #[test]
    fn progressive_tax_is_monotonic_and_bounded(
        a in amount(1_000_000_000),
        b in amount(1_000_000_000),
    ) {
        let brackets = default_income_tax_brackets();
        let schedule = IncomeTaxSchedule::new(&brackets).unwrap();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let low_tax = calculate_progressive_tax(low, &schedule);
        let high_tax = calculate_progressive_tax(high, &schedule);

        prop_assert!(low_tax >= Decimal::ZERO);
        prop_assert!(low_tax <= high_tax);
        prop_assert!(high_tax <= high * Decimal::new(40, 2));
    }
}

// =============================================================================
// Payroll properties
// =============================================================================

proptest! {
    #[test]
    fn payroll_entry_stays_within_gross(profile in employee()) {
        let params = TaxParameters::default();
        let calculator = PayrollCalculator::new(&params).unwrap();
        let entry = calculator.calculate_entry(&profile).unwrap();

        prop_assert!(entry.net_salary >= Decimal::ZERO);
        prop_assert!(entry.net_salary <= entry.gross_salary);
        prop_assert!(entry.income_tax_incentive_amount <= entry.income_tax_gross);
        prop_assert_eq!(
            entry.estimated_total_incentive,
            entry.income_tax_incentive_amount
                + entry.stamp_tax_incentive_amount
                + entry.sgk_employer_incentive_amount
        );
    }

    #[test]
    fn period_summary_matches_entries(profiles in prop::collection::vec(employee(), 0..10)) {
        let params = TaxParameters::default();
        let calculator = PayrollCalculator::new(&params).unwrap();
        let entries: Vec<_> = profiles
            .iter()
            .map(|profile| calculator.calculate_entry(profile).unwrap())
            .collect();

        let summary = aggregate_period(&entries);

        prop_assert_eq!(summary.employee_count, profiles.len());
        prop_assert_eq!(
            summary.total_personnel_cost,
            profiles.iter().map(|p| p.gross_salary).sum::<Decimal>()
        );
        prop_assert!(summary.payable_sgk >= Decimal::ZERO);
    }
}
