//! TOML loader for [`TaxParameters`].
//!
//! Every key is optional; anything left out keeps its shipped default. Money
//! and rates may be written as TOML numbers or as quoted strings. Quoted
//! strings are read digit for digit and are preferred for rates.
//!
//! ```toml
//! year = 2026
//! vat_rates = [0, 1, 10, 20]
//! stamp_tax_rate = "0.00759"
//!
//! [exemption_rates]
//! phd = "0.95"
//! master_basic_sciences = "0.95"
//! master_other = "0.90"
//! bachelor_basic_sciences = "0.90"
//! bachelor_other = "0.80"
//!
//! [[income_tax_brackets]]
//! upper_limit = 110000
//! rate = "0.15"
//!
//! [[income_tax_brackets]]
//! rate = "0.40"
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use vergi_core::{ConfigurationError, TaxParameters};

/// Errors that can occur while loading a parameter file.
#[derive(Debug, Error)]
pub enum ParameterLoadError {
    #[error("cannot read parameter file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid tax parameters: {0}")]
    Invalid(#[from] ConfigurationError),
}

/// Loader for operator-supplied tax parameters.
pub struct ParameterLoader;

impl ParameterLoader {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// * [`ParameterLoadError::Parse`] if the document is not valid TOML or a
    ///   value has the wrong type.
    /// * [`ParameterLoadError::Invalid`] if the merged parameters fail
    ///   [`TaxParameters::validate`].
    pub fn from_toml_str(input: &str) -> Result<TaxParameters, ParameterLoadError> {
        let params: TaxParameters = toml::from_str(input)?;
        params.validate()?;
        debug!(
            year = params.year,
            brackets = params.income_tax_brackets.len(),
            "tax parameters loaded"
        );
        Ok(params)
    }

    /// Reads `path` and delegates to [`ParameterLoader::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<TaxParameters, ParameterLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ParameterLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
