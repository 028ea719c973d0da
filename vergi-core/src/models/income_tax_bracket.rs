use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slice of the income tax schedule.
///
/// A bracket covers income from the previous bracket's `upper_limit` (or zero
/// for the first bracket) up to and including its own `upper_limit`. The last
/// bracket of a schedule has no upper limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxBracket {
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
}

impl IncomeTaxBracket {
    pub fn bounded(
        upper_limit: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_limit: Some(upper_limit),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_limit: None,
            rate,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper_limit.is_none()
    }
}

/// The schedule shipped for fiscal year 2026.
pub fn default_income_tax_brackets() -> Vec<IncomeTaxBracket> {
    vec![
        IncomeTaxBracket::bounded(Decimal::from(110_000), Decimal::new(15, 2)),
        IncomeTaxBracket::bounded(Decimal::from(230_000), Decimal::new(20, 2)),
        IncomeTaxBracket::bounded(Decimal::from(580_000), Decimal::new(27, 2)),
        IncomeTaxBracket::bounded(Decimal::from(3_000_000), Decimal::new(35, 2)),
        IncomeTaxBracket::unbounded(Decimal::new(40, 2)),
    ]
}
