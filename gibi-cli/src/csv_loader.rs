//! CSV loader for batch calculations.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Only
//! `category` is required; every amount column may be omitted or left empty.
//! Amounts go through the same coercion as typed CLI input: thousands
//! separators are accepted, and malformed or negative amounts count as 0.
//!
//! | Column         | Used by                              |
//! |----------------|--------------------------------------|
//! | `category`     | all: `employment`, `sole_proprietor`, `small_business`, `plc` |
//! | `label`        | all, optional row name for output     |
//! | `salary`       | employment                           |
//! | `revenue`      | sole_proprietor                      |
//! | `sales`        | small_business, plc                  |
//! | `salaries`     | sole_proprietor, plc                 |
//! | `rent`         | sole_proprietor, plc                 |
//! | `materials`    | sole_proprietor, plc                 |
//! | `depreciation` | sole_proprietor, plc                 |
//! | `interest`     | sole_proprietor, plc                 |
//! | `charity`      | sole_proprietor                      |
//! | `other`        | plc                                  |
//!
//! ### Example
//!
//! ```csv
//! category,label,salary,sales
//! employment,Abebe,5000,
//! small_business,Kebede's shop,,"400,000"
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use gibi_core::{
    CalculationInput, EmploymentInput, PlcInput, SmallBusinessInput, SoleProprietorInput,
    TaxCategory,
};
use serde::Deserialize;
use thiserror::Error;

use crate::utils::coerce_amount;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    category: String,
    label: Option<String>,
    salary: Option<String>,
    revenue: Option<String>,
    sales: Option<String>,
    salaries: Option<String>,
    rent: Option<String>,
    materials: Option<String>,
    depreciation: Option<String>,
    interest: Option<String>,
    charity: Option<String>,
    other: Option<String>,
}

/// One calculation read from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// 1-based data row number (the header is row 0).
    pub row: usize,
    pub label: Option<String>,
    pub input: CalculationInput,
}

impl BatchEntry {
    /// The label, or `row <n>` when the row has none.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("row {}", self.row),
        }
    }
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading batch CSV data.
#[derive(Debug, Error)]
pub enum CsvLoadError {
    /// The CSV itself is malformed (ragged rows, bad quoting, ...).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `category` cell is empty or not one of the recognised slugs.
    #[error("unrecognised category '{category}' on row {row}")]
    InvalidCategory { category: String, row: usize },

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchEntry, CsvLoadError> {
    let category =
        TaxCategory::parse(&row.category).ok_or_else(|| CsvLoadError::InvalidCategory {
            category: row.category.clone(),
            row: row_number,
        })?;

    let amount = |field: &str, value: &Option<String>| coerce_amount(field, value.as_deref());

    let input = match category {
        TaxCategory::Employment => EmploymentInput {
            salary: amount("salary", &row.salary),
        }
        .into(),
        TaxCategory::SoleProprietor => SoleProprietorInput {
            revenue: amount("revenue", &row.revenue),
            salaries: amount("salaries", &row.salaries),
            rent: amount("rent", &row.rent),
            materials: amount("materials", &row.materials),
            depreciation: amount("depreciation", &row.depreciation),
            interest: amount("interest", &row.interest),
            charity: amount("charity", &row.charity),
        }
        .into(),
        TaxCategory::SmallBusiness => SmallBusinessInput {
            sales: amount("sales", &row.sales),
        }
        .into(),
        TaxCategory::Plc => PlcInput {
            sales: amount("sales", &row.sales),
            salaries: amount("salaries", &row.salaries),
            rent: amount("rent", &row.rent),
            materials: amount("materials", &row.materials),
            depreciation: amount("depreciation", &row.depreciation),
            interest: amount("interest", &row.interest),
            other: amount("other", &row.other),
        }
        .into(),
    };

    Ok(BatchEntry {
        row: row_number,
        label: non_empty(row.label),
        input,
    })
}

/// Parses CSV from any reader. Rows are returned in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid.
/// * [`CsvLoadError::InvalidCategory`] for the first row whose category is
///   not recognised.
pub fn load_from_reader(reader: impl io::Read) -> Result<Vec<BatchEntry>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Parses CSV text.
pub fn load_from_str(input: &str) -> Result<Vec<BatchEntry>, CsvLoadError> {
    load_from_reader(input.as_bytes())
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<BatchEntry>, CsvLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
