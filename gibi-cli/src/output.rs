//! Rendering of calculation results for the terminal.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use gibi_core::{CalculationResult, TaxCategory, TaxData, TaxPeriod};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The breakdown table, as shown in the Mini-App.
    #[default]
    Text,
    /// One JSON object per calculation.
    Json,
}

/// A calculation as emitted in JSON output: the stored `tax_data` payload
/// plus the category, the period its amounts cover and an optional row label.
#[derive(Debug, Serialize)]
pub struct ResultRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a str>,
    pub category: TaxCategory,
    pub period: TaxPeriod,
    #[serde(flatten)]
    pub data: TaxData,
}

impl<'a> ResultRecord<'a> {
    pub fn new(
        label: Option<&'a str>,
        result: &CalculationResult,
    ) -> Self {
        Self {
            label,
            category: result.category,
            period: result.category.period(),
            data: TaxData::from_result(result),
        }
    }
}

/// Heading for one batch row, e.g. `## Abebe [Employment, monthly]`.
pub fn batch_heading(
    label: &str,
    category: TaxCategory,
) -> String {
    format!("## {label} [{category}, {}]", category.period())
}

/// Writes a single result.
pub fn write_result(
    out: &mut impl Write,
    format: OutputFormat,
    result: &CalculationResult,
) -> Result<()> {
    match format {
        OutputFormat::Text => write!(out, "{}", result.explanation)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &ResultRecord::new(None, result))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use gibi_core::calculate_small_business;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn text_output_is_the_breakdown_table() {
        let result = calculate_small_business(dec!(100000));
        let mut out = Vec::new();

        write_result(&mut out, OutputFormat::Text, &result).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), result.explanation_text());
    }

    #[test]
    fn json_output_carries_category_tax_and_explanation() {
        let result = calculate_small_business(dec!(100000));
        let mut out = Vec::new();

        write_result(&mut out, OutputFormat::Json, &result).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["category"], "small_business");
        assert_eq!(value["estimated_tax"], "2000.00");
        assert_eq!(value["explanation"], result.explanation_text());
        assert!(value.get("label").is_none());
        assert_eq!(value["period"], "annual");
    }

    #[test]
    fn batch_heading_names_category_and_period() {
        assert_eq!(
            batch_heading("Abebe", TaxCategory::Employment),
            "## Abebe [Employment, monthly]"
        );
        assert_eq!(
            batch_heading("row 3", TaxCategory::SmallBusiness),
            "## row 3 [Small Business (Category B), annual]"
        );
    }
}
