//! Line and document totals for invoices and quotes.
//!
//! # Line arithmetic
//!
//! | Field               | Formula |
//! |---------------------|---------|
//! | `line_total`        | quantity × unit price |
//! | `discounted_total`  | line total × (1 − discount) |
//! | `vat_amount`        | discounted total × VAT% / 100, zero if exempt |
//! | `withholding_amount`| VAT amount × withholding fraction |
//! | `total_with_vat`    | discounted total + VAT − withholding |
//!
//! Withholding (tevkifat) is always a fraction of the VAT amount: the buyer
//! retains part of the VAT otherwise payable to the seller.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use vergi_core::calculations::InvoiceCalculator;
//! use vergi_core::{InvoiceLineInput, TaxParameters};
//!
//! let params = TaxParameters::default();
//! let calculator = InvoiceCalculator::new(&params);
//!
//! let line = InvoiceLineInput::taxable(dec!(2), dec!(500), dec!(20)).with_withholding(dec!(0.5));
//! let result = calculator.calculate_line(&line).unwrap();
//!
//! assert_eq!(result.vat_amount, dec!(200));
//! assert_eq!(result.withholding_amount, dec!(100));
//! assert_eq!(result.total_with_vat, dec!(1100));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{checked_add, checked_mul};
use crate::error::InvalidInputError;
use crate::models::{InvoiceDocumentResult, InvoiceLineInput, InvoiceLineResult, TaxParameters};

/// Calculator for invoice and quote lines.
///
/// Holds the parameter set only to check VAT rates and withholding fractions
/// against the allowed values.
#[derive(Debug, Clone, Copy)]
pub struct InvoiceCalculator<'a> {
    params: &'a TaxParameters,
}

impl<'a> InvoiceCalculator<'a> {
    pub fn new(params: &'a TaxParameters) -> Self {
        Self { params }
    }

    /// Computes the derived amounts of one line.
    ///
    /// An exempt line carries no VAT regardless of the `vat_rate` supplied,
    /// and consequently no withholding.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] if the quantity or unit price is
    /// negative, the discount is outside `[0, 1]`, the withholding fraction or
    /// (for a taxable line) the VAT rate is not allowed, or an exempt line has
    /// no exemption code. Returns [`InvalidInputError::AmountOutOfRange`] if
    /// an amount does not fit in a [`Decimal`].
    pub fn calculate_line(
        &self,
        input: &InvoiceLineInput,
    ) -> Result<InvoiceLineResult, InvalidInputError> {
        self.validate_line(input)?;

        let line_total = checked_mul("line_total", input.quantity, input.unit_price)?;
        let discounted_total = self.discounted_total(line_total, input.discount_percent);
        let vat_amount = self.vat_amount(discounted_total, self.effective_vat_rate(input))?;
        let withholding_amount = self.withholding_amount(vat_amount, input.withholding_fraction);
        let total_with_vat =
            checked_add("total_with_vat", discounted_total, vat_amount)? - withholding_amount;

        Ok(InvoiceLineResult {
            line_total,
            discounted_total,
            vat_amount,
            withholding_amount,
            total_with_vat,
        })
    }

    /// Computes every line and the document totals.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid line.
    pub fn calculate_document(
        &self,
        lines: &[InvoiceLineInput],
    ) -> Result<InvoiceDocumentResult, InvalidInputError> {
        let results = lines
            .iter()
            .map(|line| self.calculate_line(line))
            .collect::<Result<Vec<_>, _>>()?;

        let document = InvoiceDocumentResult::from_lines(lines, &results)?;
        debug!(
            lines = lines.len(),
            subtotal = %document.subtotal,
            grand_total = %document.grand_total,
            "invoice document calculated"
        );
        Ok(document)
    }

    fn validate_line(
        &self,
        input: &InvoiceLineInput,
    ) -> Result<(), InvalidInputError> {
        if input.quantity < Decimal::ZERO {
            return Err(InvalidInputError::NegativeQuantity(input.quantity));
        }
        if input.unit_price < Decimal::ZERO {
            return Err(InvalidInputError::NegativeUnitPrice(input.unit_price));
        }
        if input.discount_percent < Decimal::ZERO || input.discount_percent > Decimal::ONE {
            return Err(InvalidInputError::InvalidDiscount(input.discount_percent));
        }
        if !self
            .params
            .is_allowed_withholding_fraction(input.withholding_fraction)
        {
            return Err(InvalidInputError::DisallowedWithholdingFraction(
                input.withholding_fraction,
            ));
        }

        if input.is_exempt {
            let has_code = input
                .exemption_code
                .as_deref()
                .is_some_and(|code| !code.trim().is_empty());
            if !has_code {
                return Err(InvalidInputError::MissingExemptionCode);
            }
        } else if !self.params.is_allowed_vat_rate(input.vat_rate) {
            return Err(InvalidInputError::DisallowedVatRate(input.vat_rate));
        }

        Ok(())
    }

    fn effective_vat_rate(
        &self,
        input: &InvoiceLineInput,
    ) -> Decimal {
        if input.is_exempt {
            Decimal::ZERO
        } else {
            input.vat_rate
        }
    }

    fn discounted_total(
        &self,
        line_total: Decimal,
        discount_percent: Decimal,
    ) -> Decimal {
        line_total * (Decimal::ONE - discount_percent)
    }

    fn vat_amount(
        &self,
        discounted_total: Decimal,
        vat_rate: Decimal,
    ) -> Result<Decimal, InvalidInputError> {
        Ok(checked_mul("vat_amount", discounted_total, vat_rate)? / Decimal::ONE_HUNDRED)
    }

    fn withholding_amount(
        &self,
        vat_amount: Decimal,
        withholding_fraction: Decimal,
    ) -> Decimal {
        vat_amount * withholding_fraction
    }
}

impl InvoiceDocumentResult {
    /// Folds already computed line results into document totals.
    ///
    /// `inputs[i]` must be the input that produced `results[i]`; the inputs are
    /// only consulted for their exemption flag. The exempt and taxable amounts
    /// partition the discounted line totals, so
    /// `exempt_amount + taxable_amount == subtotal` always holds.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::LineCountMismatch`] if the slices differ in
    /// length, or [`InvalidInputError::AmountOutOfRange`] if a total overflows.
    pub fn from_lines(
        inputs: &[InvoiceLineInput],
        results: &[InvoiceLineResult],
    ) -> Result<Self, InvalidInputError> {
        if inputs.len() != results.len() {
            return Err(InvalidInputError::LineCountMismatch {
                inputs: inputs.len(),
                results: results.len(),
            });
        }

        let mut document = Self::default();
        for (input, result) in inputs.iter().zip(results) {
            document.vat_amount = checked_add("vat_amount", document.vat_amount, result.vat_amount)?;
            document.withholding_amount = checked_add(
                "withholding_amount",
                document.withholding_amount,
                result.withholding_amount,
            )?;
            document.discount_amount = checked_add(
                "discount_amount",
                document.discount_amount,
                result.line_total - result.discounted_total,
            )?;
            if input.is_exempt {
                document.exempt_amount =
                    checked_add("exempt_amount", document.exempt_amount, result.discounted_total)?;
            } else {
                document.taxable_amount =
                    checked_add("taxable_amount", document.taxable_amount, result.discounted_total)?;
            }
        }

        document.subtotal = checked_add("subtotal", document.exempt_amount, document.taxable_amount)?;
        document.grand_total = checked_add("grand_total", document.subtotal, document.vat_amount)?
            - document.withholding_amount;

        Ok(document)
    }
}
