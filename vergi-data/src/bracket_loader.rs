use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use vergi_core::calculations::IncomeTaxSchedule;
use vergi_core::{ConfigurationError, IncomeTaxBracket};

use crate::decimal::{deserialize_decimal, deserialize_optional_decimal};

/// Errors that can occur when loading an income tax bracket table.
#[derive(Debug, Error)]
pub enum BracketLoadError {
    #[error("cannot read bracket file: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error on row {row}: {source}")]
    CsvParse {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("invalid bracket table: {0}")]
    InvalidSchedule(#[from] ConfigurationError),
}

/// A single record from the bracket CSV file.
///
/// - `upper_limit`: the top of the bracket, inclusive (empty for the last,
///   unbounded bracket)
/// - `rate`: the marginal rate as a fraction (e.g. `0.15` for 15%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct BracketRecord {
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    upper_limit: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_decimal")]
    rate: Decimal,
}

/// Loader for income tax bracket tables published as CSV.
///
/// ```csv
/// upper_limit,rate
/// 110000,0.15
/// 230000,0.20
/// 580000,0.27
/// 3000000,0.35
/// ,0.40
/// ```
pub struct BracketLoader;

impl BracketLoader {
    /// Parses a bracket table and checks that it forms a valid schedule.
    ///
    /// Rows are kept in file order; they must already be ascending.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<IncomeTaxBracket>, BracketLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let brackets = csv_reader
            .deserialize::<BracketRecord>()
            .enumerate()
            .map(|(idx, result)| {
                let record = result.map_err(|source| BracketLoadError::CsvParse {
                    row: idx + 1,
                    source,
                })?;
                Ok(IncomeTaxBracket {
                    upper_limit: record.upper_limit,
                    rate: record.rate,
                })
            })
            .collect::<Result<Vec<_>, BracketLoadError>>()?;

        IncomeTaxSchedule::new(&brackets)?;
        Ok(brackets)
    }

    pub fn from_file(path: &Path) -> Result<Vec<IncomeTaxBracket>, BracketLoadError> {
        let file = std::fs::File::open(path)?;
        Self::parse(file)
    }
}
