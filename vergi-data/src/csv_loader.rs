//! CSV loaders for invoice lines and payroll employees.
//!
//! Headers are matched by name, so column order does not matter and extra
//! columns are ignored. Whitespace around values is trimmed.
//!
//! ## Invoice lines
//!
//! | Column                 | Required | Type    | Notes |
//! |------------------------|----------|---------|-------|
//! | `quantity`             | yes      | decimal | |
//! | `unit_price`           | yes      | decimal | |
//! | `vat_rate`             | yes      | decimal | Percentage, e.g. `20` |
//! | `is_exempt`            | no       | bool    | `true`/`false`, empty for `false` |
//! | `exemption_code`       | no       | string  | Required by the calculator when exempt |
//! | `withholding_fraction` | no       | decimal | Empty for `0` |
//! | `discount_percent`     | no       | decimal | Fraction, empty for `0` |
//!
//! ```csv
//! quantity,unit_price,vat_rate,is_exempt,exemption_code,withholding_fraction
//! 1,1000,20,false,,
//! 2,500,20,false,,0.5
//! 1,1000,0,true,351,
//! ```
//!
//! ## Employees
//!
//! | Column             | Required | Type    | Notes |
//! |--------------------|----------|---------|-------|
//! | `gross_salary`     | yes      | decimal | Monthly gross |
//! | `personnel_type`   | yes      | string  | `RD_PERSONNEL`, `SUPPORT` or `OTHER` |
//! | `education_level`  | no       | string  | `NONE`, `BACHELOR`, `MASTER`, `PHD`; empty for `NONE` |
//! | `graduation_field` | no       | string  | `BASIC_SCIENCES` or `OTHER`; empty for `OTHER` |
//!
//! ```csv
//! gross_salary,personnel_type,education_level,graduation_field
//! 100000,RD_PERSONNEL,BACHELOR,OTHER
//! 45000,SUPPORT,,
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use vergi_core::{EducationLevel, EmployeeProfile, GraduationField, InvoiceLineInput, PersonnelType};

use crate::decimal::{deserialize_decimal, deserialize_optional_decimal};

// ---------------------------------------------------------------------------
// Serde-compatible rows that mirror the CSV layouts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct InvoiceRow {
    #[serde(deserialize_with = "deserialize_decimal")]
    quantity: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    unit_price: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    vat_rate: Decimal,
    is_exempt: Option<bool>,
    exemption_code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    withholding_fraction: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    discount_percent: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct EmployeeRow {
    #[serde(deserialize_with = "deserialize_decimal")]
    gross_salary: Decimal,
    personnel_type: String,
    education_level: Option<String>,
    graduation_field: Option<String>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
///
/// Row numbers are 1-based and count data rows only (the header is row 0).
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The row is structurally invalid, misses a required column or holds a
    /// value of the wrong type.
    #[error("CSV parse error on row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// A code column holds a value outside its vocabulary.
    #[error("unrecognised {column} '{value}' on row {row}")]
    InvalidCode {
        column: &'static str,
        value: String,
        row: usize,
    },
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

fn convert_invoice_row(row: InvoiceRow) -> InvoiceLineInput {
    InvoiceLineInput {
        quantity: row.quantity,
        unit_price: row.unit_price,
        vat_rate: row.vat_rate,
        is_exempt: row.is_exempt.unwrap_or(false),
        exemption_code: row.exemption_code.filter(|code| !code.is_empty()),
        withholding_fraction: row.withholding_fraction.unwrap_or_default(),
        discount_percent: row.discount_percent.unwrap_or_default(),
    }
}

fn parse_code<T>(
    column: &'static str,
    value: &str,
    row: usize,
    parse: fn(&str) -> Option<T>,
) -> Result<T, CsvLoadError> {
    parse(&value.to_ascii_uppercase()).ok_or_else(|| CsvLoadError::InvalidCode {
        column,
        value: value.to_string(),
        row,
    })
}

fn convert_employee_row(
    row: EmployeeRow,
    row_number: usize,
) -> Result<EmployeeProfile, CsvLoadError> {
    let personnel_type = parse_code(
        "personnel_type",
        &row.personnel_type,
        row_number,
        PersonnelType::parse,
    )?;
    let education_level = match row.education_level.as_deref() {
        None | Some("") => EducationLevel::None,
        Some(value) => parse_code("education_level", value, row_number, EducationLevel::parse)?,
    };
    let graduation_field = match row.graduation_field.as_deref() {
        None | Some("") => GraduationField::Other,
        Some(value) => parse_code("graduation_field", value, row_number, GraduationField::parse)?,
    };

    Ok(EmployeeProfile {
        gross_salary: row.gross_salary,
        personnel_type,
        education_level,
        graduation_field,
    })
}

// ---------------------------------------------------------------------------
// Core loaders
// ---------------------------------------------------------------------------

fn reader(input: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes())
}

fn read_file(path: &Path) -> Result<String, CsvLoadError> {
    std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses invoice lines from CSV text. Rows are returned in file order.
///
/// # Errors
///
/// [`CsvLoadError::Parse`] if a row is malformed or a required numeric cell
/// is missing.
pub fn load_invoice_lines_from_str(input: &str) -> Result<Vec<InvoiceLineInput>, CsvLoadError> {
    reader(input)
        .deserialize::<InvoiceRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result.map_err(|source| CsvLoadError::Parse {
                row: idx + 1,
                source,
            })?;
            Ok(convert_invoice_row(row))
        })
        .collect()
}

/// Reads a file from disk and delegates to [`load_invoice_lines_from_str`].
pub fn load_invoice_lines_from_file(path: &Path) -> Result<Vec<InvoiceLineInput>, CsvLoadError> {
    load_invoice_lines_from_str(&read_file(path)?)
}

/// Parses employee profiles from CSV text. Rows are returned in file order.
///
/// Code columns are matched case-insensitively.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if a row is malformed or `gross_salary` is
///   missing.
/// * [`CsvLoadError::InvalidCode`] if a code column holds an unknown value.
pub fn load_employees_from_str(input: &str) -> Result<Vec<EmployeeProfile>, CsvLoadError> {
    reader(input)
        .deserialize::<EmployeeRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row_number = idx + 1;
            let row = result.map_err(|source| CsvLoadError::Parse {
                row: row_number,
                source,
            })?;
            convert_employee_row(row, row_number)
        })
        .collect()
}

/// Reads a file from disk and delegates to [`load_employees_from_str`].
pub fn load_employees_from_file(path: &Path) -> Result<Vec<EmployeeProfile>, CsvLoadError> {
    load_employees_from_str(&read_file(path)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
