//! Report content delivered after a payment is approved.
//!
//! A calculation is stored on the payment record as a [`TaxData`] JSON
//! payload. On approval the payload becomes a [`TaxReport`]: a short plain
//! text document with the taxpayer, the breakdown and the tax figure.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::CalculationResult;
use crate::calculations::common::format_amount;

/// Caption sent alongside the delivered report.
pub const DELIVERY_CAPTION: &str = "Payment Verified! Here is your official Gibi-Guide Tax Report.";

const REPORT_HEADING: &str = "Ethiopian Tax Consultant";
const DISCLAIMER: &str = "Disclaimer: Based on 2026 Proclamation rules.";

/// Longest explanation excerpt carried into a report, in characters.
pub const SUMMARY_LIMIT: usize = 800;

/// The calculation payload stored on a payment record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxData {
    #[serde(default)]
    pub estimated_tax: Option<Decimal>,
    #[serde(default)]
    pub explanation: String,
}

impl TaxData {
    /// Captures a result, with the tax carried at exactly two decimals.
    pub fn from_result(result: &CalculationResult) -> Self {
        let mut estimated_tax = result.estimated_tax;
        estimated_tax.rescale(2);
        Self {
            estimated_tax: Some(estimated_tax),
            explanation: result.explanation_text(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Reads a stored payload. Malformed or empty text yields an empty
    /// payload so that report generation can still proceed.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        serde_json::from_str(raw).unwrap_or_else(|error| {
            warn!(%error, "stored tax data is not valid JSON; using empty payload");
            Self::default()
        })
    }

    /// The `Estimated Tax: ... ETB` line printed on a report.
    pub fn tax_line(&self) -> String {
        match self.estimated_tax {
            Some(tax) => format!("Estimated Tax: {}", format_amount(tax)),
            None => "Estimated Tax: unavailable".to_string(),
        }
    }
}

impl From<&CalculationResult> for TaxData {
    fn from(result: &CalculationResult) -> Self {
        Self::from_result(result)
    }
}

/// A rendered tax report for one taxpayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxReport {
    pub taxpayer: String,
    pub summary: String,
    pub tax_line: String,
    pub date: NaiveDate,
}

impl TaxReport {
    /// Builds a report, truncating the explanation to [`SUMMARY_LIMIT`]
    /// characters.
    pub fn new(
        taxpayer: impl Into<String>,
        data: &TaxData,
        date: NaiveDate,
    ) -> Self {
        Self {
            taxpayer: taxpayer.into(),
            summary: data.explanation.chars().take(SUMMARY_LIMIT).collect(),
            tax_line: data.tax_line(),
            date,
        }
    }

    /// `Tax_Report_<YYYY-MM-DD>.txt`
    pub fn file_name(&self) -> String {
        format!("Tax_Report_{}.txt", self.date.format("%Y-%m-%d"))
    }

    /// The storage reference recorded on the payment, `reports/<file name>`.
    pub fn file_reference(&self) -> String {
        format!("reports/{}", self.file_name())
    }
}

impl fmt::Display for TaxReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{REPORT_HEADING}")?;
        writeln!(f)?;
        writeln!(f, "Taxpayer: {}", self.taxpayer)?;
        writeln!(f, "Date: {}", self.date.format("%Y-%m-%d"))?;
        writeln!(f)?;
        writeln!(f, "Income Summary:")?;
        writeln!(f, "{}", self.summary.trim_end())?;
        writeln!(f)?;
        writeln!(f, "Calculated Tax:")?;
        writeln!(f, "{}", self.tax_line)?;
        writeln!(f)?;
        writeln!(f, "{DISCLAIMER}")
    }
}
