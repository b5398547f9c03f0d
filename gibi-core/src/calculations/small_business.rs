//! Category B small business turnover tax.
//!
//! Gross sales are resolved directly against the Category B table with no
//! deductions, and the matched rate applies to the full sales figure.

use super::TaxCalculator;
use super::common::{clamp_input, non_negative, round_half_up};
use crate::{CalculationResult, Explanation, SmallBusinessInput, TaxCategory};

impl TaxCalculator<'_> {
    /// Calculates Category B tax on annual gross sales.
    pub fn small_business(
        &self,
        input: &SmallBusinessInput,
    ) -> CalculationResult {
        let sales = clamp_input("sales", input.sales);

        let bracket = self.schedule.small_business_brackets.resolve(sales);
        let tax = round_half_up(non_negative(sales * bracket.rate));

        let explanation = Explanation::new("Small Business Gross Sales Tax (Category B)")
            .amount("Annual Gross Sales", sales)
            .bracket("Bracket", bracket.upper_bound)
            .rate("Rate on Sales", bracket.rate)
            .amount("Tax", tax);

        CalculationResult {
            category: TaxCategory::SmallBusiness,
            estimated_tax: tax,
            rate: bracket.rate,
            explanation,
        }
    }
}
