//! Serde helpers that read CSV cells as exact decimals.
//!
//! The csv crate hands numeric-looking cells to `Decimal`'s own visitor as
//! `f64`. These helpers take the raw text instead and parse it digit for
//! digit.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

fn parse<E: serde::de::Error>(s: &str) -> Result<Decimal, E> {
    let s = s.trim();
    s.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|e| E::custom(format!("invalid decimal '{s}': {e}")))
}

/// A required decimal cell. An empty cell is an error.
pub fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s)
}

/// An optional decimal cell. An empty cell or a missing column is `None`.
///
/// Pair with `#[serde(default)]` so a missing column is accepted.
pub fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse(&s).map(Some),
        None => Ok(None),
    }
}
