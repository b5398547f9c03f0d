//! Monthly employment income tax.
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Gross salary |
//! | 2    | Pension contribution: Line 1 × 7% |
//! | 3    | Taxable income: Line 1 − Line 2 (not below zero) |
//! | 4    | Bracket and rate resolved for Line 3 |
//! | 5    | Tax: Line 3 × rate |
//!
//! The bracket rate applies to the whole taxable income once it lands in a
//! bracket; there is no marginal blending across lower brackets.
//!
//! Lines are carried at full precision. Only the displayed items and the
//! final tax are rounded, so a base a fraction above a bound stays above it.

use super::TaxCalculator;
use super::common::{clamp_input, non_negative, percent_label, round_half_up};
use crate::{CalculationResult, EmploymentInput, Explanation, TaxCategory};

impl TaxCalculator<'_> {
    /// Calculates monthly employment tax.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use gibi_core::{EmploymentInput, TaxCalculator};
    ///
    /// let result = TaxCalculator::standard().employment(&EmploymentInput { salary: dec!(5000) });
    ///
    /// // Pension 350, taxable 4650, 20% bracket
    /// assert_eq!(result.estimated_tax, dec!(930.00));
    /// ```
    pub fn employment(
        &self,
        input: &EmploymentInput,
    ) -> CalculationResult {
        let salary = clamp_input("salary", input.salary);

        // Line 2
        let pension = salary * self.schedule.pension_rate;

        // Line 3
        let taxable = non_negative(salary - pension);

        // Line 4
        let bracket = self.schedule.employment_brackets.resolve(taxable);

        // Line 5
        let tax = round_half_up(non_negative(taxable * bracket.rate));

        let explanation = Explanation::new("Monthly Employment Tax")
            .amount("Gross Salary", salary)
            .amount(
                format!("Pension ({}%)", percent_label(self.schedule.pension_rate)),
                pension,
            )
            .amount("Taxable Income", taxable)
            .bracket("Bracket", bracket.upper_bound)
            .rate("Rate", bracket.rate)
            .amount("Estimated Tax", tax);

        CalculationResult {
            category: TaxCategory::Employment,
            estimated_tax: tax,
            rate: bracket.rate,
            explanation,
        }
    }
}
