//! Calculation results and their line-item breakdown.
//!
//! An [`Explanation`] renders as a two-column table:
//!
//! ```text
//! Monthly Employment Tax:
//! | Item | Amount |
//! |---|---|
//! | Gross Salary | 5000.00 ETB |
//! | Pension (7%) | 350.00 ETB |
//! | Taxable Income | 4650.00 ETB |
//! | Bracket | up to 7000 ETB |
//! | Rate | 20% |
//! | Estimated Tax | 930.00 ETB |
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxCategory;
use crate::calculations::common::{format_amount, format_bound, format_rate, round_half_up};

/// The value shown in the right-hand column of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LineValue {
    /// A currency amount, shown with two decimals and the `ETB` suffix.
    Amount(Decimal),
    /// A fraction, shown as an integer percentage.
    Rate(Decimal),
    /// A bracket's upper bound; `None` is the unbounded top bracket.
    BracketBound(Option<Decimal>),
}

impl fmt::Display for LineValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Amount(amount) => f.write_str(&format_amount(*amount)),
            Self::Rate(rate) => f.write_str(&format_rate(*rate)),
            Self::BracketBound(bound) => f.write_str(&format_bound(*bound)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub value: LineValue,
}

/// Ordered line items describing how a tax figure was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    title: String,
    items: Vec<LineItem>,
}

impl Explanation {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Adds an amount line, rounded half-up to two decimals as displayed.
    pub fn amount(
        self,
        label: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        self.item(label, LineValue::Amount(round_half_up(amount)))
    }

    pub fn rate(
        self,
        label: impl Into<String>,
        rate: Decimal,
    ) -> Self {
        self.item(label, LineValue::Rate(rate))
    }

    pub fn bracket(
        self,
        label: impl Into<String>,
        upper_bound: Option<Decimal>,
    ) -> Self {
        self.item(label, LineValue::BracketBound(upper_bound))
    }

    fn item(
        mut self,
        label: impl Into<String>,
        value: LineValue,
    ) -> Self {
        self.items.push(LineItem {
            label: label.into(),
            value,
        });
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Item labels in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.label.as_str()).collect()
    }

    /// Looks up the value of the first item with `label`.
    pub fn value_of(
        &self,
        label: &str,
    ) -> Option<&LineValue> {
        self.items
            .iter()
            .find(|item| item.label == label)
            .map(|item| &item.value)
    }

    /// Looks up an amount item by label.
    pub fn amount_of(
        &self,
        label: &str,
    ) -> Option<Decimal> {
        match self.value_of(label) {
            Some(LineValue::Amount(amount)) => Some(*amount),
            _ => None,
        }
    }
}

impl fmt::Display for Explanation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}:", self.title)?;
        writeln!(f, "| Item | Amount |")?;
        writeln!(f, "|---|---|")?;
        for item in &self.items {
            writeln!(f, "| {} | {} |", item.label, item.value)?;
        }
        Ok(())
    }
}

/// The outcome of one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub category: TaxCategory,

    /// Final tax in ETB, never negative, rounded to two decimals.
    pub estimated_tax: Decimal,

    /// The rate that produced the tax: the resolved bracket rate, or the flat
    /// PLC rate.
    pub rate: Decimal,

    pub explanation: Explanation,
}

impl CalculationResult {
    /// The rendered breakdown table.
    pub fn explanation_text(&self) -> String {
        self.explanation.to_string()
    }
}
