mod calculation_input;
mod calculation_result;
mod rate_schedule;
mod tax_bracket;
mod tax_category;

pub use calculation_input::{
    CalculationInput, EmploymentInput, PlcInput, SmallBusinessInput, SoleProprietorInput,
};
pub use calculation_result::{CalculationResult, Explanation, LineItem, LineValue};
pub use rate_schedule::{RateSchedule, RateScheduleError};
pub use tax_bracket::{BracketTable, BracketTableError, TaxBracket};
pub use tax_category::{TaxCategory, TaxPeriod};
