//! Annual sole proprietor business income tax.
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Annual revenue |
//! | 2    | Operating deductions: salaries + rent + materials + depreciation + interest |
//! | 3    | Profit before charity: Line 1 − Line 2 (not below zero) |
//! | 4    | Charity cap: Line 3 × 10% |
//! | 5    | Charity used: smaller of declared charity or Line 4 |
//! | 6    | Taxable profit: Line 3 − Line 5 (not below zero) |
//! | 7    | Bracket tax: Line 6 × bracket rate |
//! | 8    | Minimum alternative tax (MAT): Line 1 × 2.5% |
//! | 9    | Final tax: larger of Line 7 or Line 8 |
//!
//! MAT is computed on gross revenue, not profit, and acts as a floor. Lines
//! are carried at full precision; only the displayed items and the final tax
//! are rounded.

use tracing::debug;

use super::TaxCalculator;
use super::common::{clamp_input, max, non_negative, percent_label, round_half_up};
use crate::{CalculationResult, Explanation, SoleProprietorInput, TaxCategory};

impl TaxCalculator<'_> {
    /// Calculates annual sole proprietor tax.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use gibi_core::{SoleProprietorInput, TaxCalculator};
    ///
    /// let input = SoleProprietorInput { revenue: dec!(600000), ..Default::default() };
    /// let result = TaxCalculator::standard().sole_proprietor(&input);
    ///
    /// // 600000 at 35% beats the 15000 MAT floor
    /// assert_eq!(result.estimated_tax, dec!(210000.00));
    /// ```
    pub fn sole_proprietor(
        &self,
        input: &SoleProprietorInput,
    ) -> CalculationResult {
        let input = SoleProprietorInput {
            revenue: clamp_input("revenue", input.revenue),
            salaries: clamp_input("salaries", input.salaries),
            rent: clamp_input("rent", input.rent),
            materials: clamp_input("materials", input.materials),
            depreciation: clamp_input("depreciation", input.depreciation),
            interest: clamp_input("interest", input.interest),
            charity: clamp_input("charity", input.charity),
        };

        // Lines 2-3
        let operating_deductions = input.operating_deductions();
        let pre_charity_profit = non_negative(input.revenue - operating_deductions);

        // Lines 4-5
        let charity_cap = pre_charity_profit * self.schedule.charity_cap_rate;
        let charity_used = input.charity.min(charity_cap);

        // Line 6
        let taxable_profit = non_negative(pre_charity_profit - charity_used);

        // Line 7
        let bracket = self.schedule.sole_proprietor_brackets.resolve(taxable_profit);
        let bracket_tax = non_negative(taxable_profit * bracket.rate);

        // Lines 8-9
        let mat = input.revenue * self.schedule.minimum_alternative_tax_rate;
        let final_tax = round_half_up(max(bracket_tax, mat));

        if mat > bracket_tax {
            debug!(
                bracket_tax = %bracket_tax,
                mat = %mat,
                "minimum alternative tax exceeds bracket tax"
            );
        }

        let cap_percent = percent_label(self.schedule.charity_cap_rate);
        let explanation = Explanation::new("Annual Sole Proprietor Tax")
            .amount("Annual Revenue", input.revenue)
            .amount("Salaries", input.salaries)
            .amount("Rent & Utilities", input.rent)
            .amount("Raw Materials", input.materials)
            .amount("Depreciation", input.depreciation)
            .amount("Interest", input.interest)
            .amount("Operating Deductions", operating_deductions)
            .amount("Profit Before Charity", pre_charity_profit)
            .amount(format!("Charity Cap ({cap_percent}%)"), charity_cap)
            .amount(format!("Charity (capped ≤{cap_percent}%)"), charity_used)
            .amount("Taxable Profit", taxable_profit)
            .bracket("Bracket", bracket.upper_bound)
            .rate("Rate", bracket.rate)
            .amount("Estimated Tax", bracket_tax)
            .amount(
                format!(
                    "MAT ({}% of turnover)",
                    percent_label(self.schedule.minimum_alternative_tax_rate)
                ),
                mat,
            )
            .amount("Final Tax", final_tax);

        CalculationResult {
            category: TaxCategory::SoleProprietor,
            estimated_tax: final_tax,
            rate: bracket.rate,
            explanation,
        }
    }
}
