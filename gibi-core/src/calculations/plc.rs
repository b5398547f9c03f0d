//! PLC / share company profit tax.
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Annual gross sales |
//! | 2    | VAT deduction: Line 1 × 15% |
//! | 3    | Sales after VAT: Line 1 − Line 2 (not below zero) |
//! | 4    | Total deductions: every named deduction field |
//! | 5    | Taxable profit: Line 3 − Line 4 (not below zero) |
//! | 6    | Tax: Line 5 × 30% |

use super::TaxCalculator;
use super::common::{clamp_input, non_negative, percent_label, round_half_up};
use crate::{CalculationResult, Explanation, PlcInput, TaxCategory};

impl TaxCalculator<'_> {
    /// Calculates PLC tax at the flat statutory rate.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use gibi_core::{PlcInput, TaxCalculator};
    ///
    /// let input = PlcInput {
    ///     sales: dec!(1000000),
    ///     salaries: dec!(200000),
    ///     ..Default::default()
    /// };
    /// let result = TaxCalculator::standard().plc(&input);
    ///
    /// // (1000000 × 85% − 200000) × 30%
    /// assert_eq!(result.estimated_tax, dec!(195000.00));
    /// ```
    pub fn plc(
        &self,
        input: &PlcInput,
    ) -> CalculationResult {
        let input = PlcInput {
            sales: clamp_input("sales", input.sales),
            salaries: clamp_input("salaries", input.salaries),
            rent: clamp_input("rent", input.rent),
            materials: clamp_input("materials", input.materials),
            depreciation: clamp_input("depreciation", input.depreciation),
            interest: clamp_input("interest", input.interest),
            other: clamp_input("other", input.other),
        };
        let rate = self.schedule.plc_rate;

        // Lines 2-3
        let vat = input.sales * self.schedule.vat_rate;
        let sales_after_vat = non_negative(input.sales - vat);

        // Lines 4-5
        let deductions = input.total_deductions();
        let taxable_profit = non_negative(sales_after_vat - deductions);

        // Line 6
        let tax = round_half_up(taxable_profit * rate);

        let explanation = Explanation::new("PLC / Share Company Tax")
            .amount("Annual Gross Sales", input.sales)
            .amount(
                format!("VAT Deduction ({}%)", percent_label(self.schedule.vat_rate)),
                vat,
            )
            .amount("Sales After VAT", sales_after_vat)
            .amount("Salaries", input.salaries)
            .amount("Rent & Utilities", input.rent)
            .amount("Raw Materials", input.materials)
            .amount("Depreciation", input.depreciation)
            .amount("Interest", input.interest)
            .amount("Other Deductions", input.other)
            .amount("Total Deductions", deductions)
            .amount("Taxable Profit", taxable_profit)
            .rate("Rate", rate)
            .amount("Final Tax", tax);

        CalculationResult {
            category: TaxCategory::Plc,
            estimated_tax: tax,
            rate,
            explanation,
        }
    }
}
