use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single sales/purchase invoice or quote line as entered by the user.
///
/// `vat_rate` is a percentage (`20` for 20%), while `withholding_fraction` and
/// `discount_percent` are fractions (`0.5` for 5/10). Invoices never carry a
/// discount; only quotes do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineInput {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub vat_rate: Decimal,
    pub is_exempt: bool,
    #[serde(default)]
    pub exemption_code: Option<String>,
    #[serde(default)]
    pub withholding_fraction: Decimal,
    #[serde(default)]
    pub discount_percent: Decimal,
}

impl InvoiceLineInput {
    /// A taxable line with no withholding or discount.
    pub fn taxable(
        quantity: Decimal,
        unit_price: Decimal,
        vat_rate: Decimal,
    ) -> Self {
        Self {
            quantity,
            unit_price,
            vat_rate,
            is_exempt: false,
            exemption_code: None,
            withholding_fraction: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
        }
    }

    /// A VAT-exempt line tagged with its regulatory exemption code.
    pub fn exempt(
        quantity: Decimal,
        unit_price: Decimal,
        exemption_code: impl Into<String>,
    ) -> Self {
        Self {
            quantity,
            unit_price,
            vat_rate: Decimal::ZERO,
            is_exempt: true,
            exemption_code: Some(exemption_code.into()),
            withholding_fraction: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
        }
    }

    pub fn with_withholding(
        mut self,
        fraction: Decimal,
    ) -> Self {
        self.withholding_fraction = fraction;
        self
    }

    pub fn with_discount(
        mut self,
        discount_percent: Decimal,
    ) -> Self {
        self.discount_percent = discount_percent;
        self
    }
}

/// Amounts derived from one [`InvoiceLineInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineResult {
    /// Quantity × unit price.
    pub line_total: Decimal,

    /// Line total after the quote discount (equal to `line_total` on invoices).
    pub discounted_total: Decimal,

    pub vat_amount: Decimal,

    /// Portion of the VAT retained by the buyer (tevkifat).
    pub withholding_amount: Decimal,

    /// Discounted total + VAT − withholding.
    pub total_with_vat: Decimal,
}

/// Document-level totals across all lines of an invoice or quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDocumentResult {
    /// Sum of the discounted line totals.
    pub subtotal: Decimal,

    /// Sum of `line_total − discounted_total`; zero on invoices.
    pub discount_amount: Decimal,
    pub vat_amount: Decimal,
    pub withholding_amount: Decimal,
    pub exempt_amount: Decimal,
    pub taxable_amount: Decimal,
    pub grand_total: Decimal,
}
