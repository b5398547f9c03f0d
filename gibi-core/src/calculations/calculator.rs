use std::borrow::Cow;

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    CalculationInput, CalculationResult, EmploymentInput, PlcInput, RateSchedule,
    SmallBusinessInput, SoleProprietorInput,
};

/// Calculator over a [`RateSchedule`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use gibi_core::{CalculationInput, SmallBusinessInput, TaxCalculator};
///
/// let calculator = TaxCalculator::standard();
/// let input = CalculationInput::SmallBusiness(SmallBusinessInput { sales: dec!(100000) });
///
/// let result = calculator.calculate(&input);
///
/// assert_eq!(result.estimated_tax, dec!(2000.00));
/// ```
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    pub(super) schedule: Cow<'a, RateSchedule>,
}

impl TaxCalculator<'static> {
    /// A calculator that owns `schedule`.
    pub fn new(schedule: RateSchedule) -> Self {
        Self {
            schedule: Cow::Owned(schedule),
        }
    }

    /// A calculator over the shared [`RateSchedule::standard`] schedule.
    pub fn standard() -> Self {
        Self {
            schedule: Cow::Borrowed(RateSchedule::standard()),
        }
    }
}

impl<'a> TaxCalculator<'a> {
    /// A calculator that borrows `schedule`.
    pub fn with_schedule(schedule: &'a RateSchedule) -> Self {
        Self {
            schedule: Cow::Borrowed(schedule),
        }
    }

    pub fn schedule(&self) -> &RateSchedule {
        &self.schedule
    }

    /// Runs the calculator matching the input's category.
    pub fn calculate(
        &self,
        input: &CalculationInput,
    ) -> CalculationResult {
        let result = match input {
            CalculationInput::Employment(input) => self.employment(input),
            CalculationInput::SoleProprietor(input) => self.sole_proprietor(input),
            CalculationInput::SmallBusiness(input) => self.small_business(input),
            CalculationInput::Plc(input) => self.plc(input),
        };

        debug!(
            category = result.category.as_str(),
            estimated_tax = %result.estimated_tax,
            rate = %result.rate,
            "tax calculated"
        );
        result
    }
}

/// Employment tax on a monthly gross salary, using the standard schedule.
///
/// ```
/// use rust_decimal_macros::dec;
/// use gibi_core::calculate_employment;
///
/// assert_eq!(calculate_employment(dec!(5000)).estimated_tax, dec!(930.00));
/// ```
pub fn calculate_employment(salary: Decimal) -> CalculationResult {
    TaxCalculator::standard().calculate(&EmploymentInput { salary }.into())
}

/// Annual sole proprietor tax, using the standard schedule.
pub fn calculate_sole_proprietor(
    revenue: Decimal,
    salaries: Decimal,
    rent: Decimal,
    materials: Decimal,
    depreciation: Decimal,
    interest: Decimal,
    charity: Decimal,
) -> CalculationResult {
    let input = SoleProprietorInput {
        revenue,
        salaries,
        rent,
        materials,
        depreciation,
        interest,
        charity,
    };
    TaxCalculator::standard().calculate(&input.into())
}

/// Annual Category B tax on gross sales, using the standard schedule.
pub fn calculate_small_business(sales: Decimal) -> CalculationResult {
    TaxCalculator::standard().calculate(&SmallBusinessInput { sales }.into())
}

/// Annual PLC / share company tax, using the standard schedule.
pub fn calculate_plc(
    sales: Decimal,
    salaries: Decimal,
    rent: Decimal,
    materials: Decimal,
    depreciation: Decimal,
    interest: Decimal,
    other: Decimal,
) -> CalculationResult {
    let input = PlcInput {
        sales,
        salaries,
        rent,
        materials,
        depreciation,
        interest,
        other,
    };
    TaxCalculator::standard().calculate(&input.into())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{TaxBracket, TaxCategory};

    #[test]
    fn calculate_dispatches_on_category() {
        let calculator = TaxCalculator::standard();

        for category in TaxCategory::ALL {
            let result = calculator.calculate(&CalculationInput::empty(category));

            assert_eq!(result.category, category);
            assert_eq!(result.estimated_tax, dec!(0));
        }
    }

    #[test]
    fn calculate_is_idempotent() {
        let calculator = TaxCalculator::standard();
        let input = CalculationInput::from(SoleProprietorInput {
            revenue: dec!(250000),
            salaries: dec!(40000),
            rent: dec!(12000),
            charity: dec!(5000),
            ..Default::default()
        });

        let first = calculator.calculate(&input);
        let second = calculator.calculate(&input);

        assert_eq!(first, second);
        assert_eq!(first.explanation_text(), second.explanation_text());
    }

    #[test]
    fn custom_schedule_changes_result() {
        let schedule = RateSchedule {
            small_business_brackets: crate::BracketTable::new(vec![TaxBracket::unbounded(
                dec!(0.01),
            )])
            .unwrap(),
            ..RateSchedule::ethiopia_2026()
        };
        let calculator = TaxCalculator::with_schedule(&schedule);

        let result = calculator.small_business(&SmallBusinessInput { sales: dec!(100000) });

        assert_eq!(result.estimated_tax, dec!(1000.00));
    }

    #[test]
    fn free_functions_match_standard_calculator() {
        let calculator = TaxCalculator::standard();

        assert_eq!(
            calculate_small_business(dec!(750000)),
            calculator.small_business(&SmallBusinessInput { sales: dec!(750000) })
        );
        assert_eq!(
            calculate_plc(
                dec!(1000000),
                dec!(50000),
                dec!(50000),
                dec!(50000),
                dec!(20000),
                dec!(20000),
                dec!(10000),
            )
            .estimated_tax,
            dec!(195000.00)
        );
    }

    #[test]
    fn owned_schedule_calculator_works() {
        let calculator = TaxCalculator::new(RateSchedule::ethiopia_2026());

        assert_eq!(
            calculator.schedule().pension_rate,
            RateSchedule::standard().pension_rate
        );
        assert_eq!(
            calculator
                .employment(&EmploymentInput { salary: dec!(5000) })
                .estimated_tax,
            dec!(930.00)
        );
    }
}
