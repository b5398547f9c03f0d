//! Statutory rates and bracket tables used by every calculator.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BracketTable, TaxBracket};

/// Monthly employment income brackets.
const EMPLOYMENT_BRACKETS: [TaxBracket; 6] = [
    TaxBracket::bounded(dec!(2000), dec!(0.00)),
    TaxBracket::bounded(dec!(4000), dec!(0.15)),
    TaxBracket::bounded(dec!(7000), dec!(0.20)),
    TaxBracket::bounded(dec!(10000), dec!(0.25)),
    TaxBracket::bounded(dec!(14000), dec!(0.30)),
    TaxBracket::unbounded(dec!(0.35)),
];

/// Annual sole proprietor profit brackets.
const SOLE_PROPRIETOR_BRACKETS: [TaxBracket; 6] = [
    TaxBracket::bounded(dec!(24000), dec!(0.00)),
    TaxBracket::bounded(dec!(48000), dec!(0.15)),
    TaxBracket::bounded(dec!(84000), dec!(0.20)),
    TaxBracket::bounded(dec!(120000), dec!(0.25)),
    TaxBracket::bounded(dec!(168000), dec!(0.30)),
    TaxBracket::unbounded(dec!(0.35)),
];

/// Annual Category B gross sales brackets. The top two tiers share a rate.
const SMALL_BUSINESS_BRACKETS: [TaxBracket; 6] = [
    TaxBracket::bounded(dec!(100000), dec!(0.02)),
    TaxBracket::bounded(dec!(500000), dec!(0.03)),
    TaxBracket::bounded(dec!(1000000), dec!(0.05)),
    TaxBracket::bounded(dec!(1500000), dec!(0.07)),
    TaxBracket::bounded(dec!(2000000), dec!(0.09)),
    TaxBracket::unbounded(dec!(0.09)),
];

static STANDARD: LazyLock<RateSchedule> = LazyLock::new(RateSchedule::ethiopia_2026);

/// Errors raised when a schedule carries a rate outside `[0, 1]`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateScheduleError {
    #[error("{name} must be between 0 and 1, got {rate}")]
    RateOutOfRange { name: &'static str, rate: Decimal },
}

/// Every rate and table the calculators read.
///
/// The schedule is plain configuration: build it once, share it by
/// reference, never mutate it while calculating. Bracket tables validate
/// themselves on construction, so [`RateSchedule::validate`] only has the
/// scalar rates left to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSchedule {
    /// Employee pension contribution withheld from gross salary.
    pub pension_rate: Decimal,

    /// Share of pre-charity profit that charitable giving may offset.
    pub charity_cap_rate: Decimal,

    /// Minimum alternative tax, as a share of gross revenue.
    pub minimum_alternative_tax_rate: Decimal,

    /// VAT share removed from PLC gross sales.
    pub vat_rate: Decimal,

    /// Flat rate on PLC taxable profit.
    pub plc_rate: Decimal,

    /// Monthly brackets applied to salary after pension.
    pub employment_brackets: BracketTable,

    /// Annual brackets applied to sole proprietor taxable profit.
    pub sole_proprietor_brackets: BracketTable,

    /// Annual brackets applied to Category B gross sales.
    pub small_business_brackets: BracketTable,
}

impl RateSchedule {
    /// The schedule shipped with the engine (2026 proclamation figures).
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use gibi_core::RateSchedule;
    ///
    /// let schedule = RateSchedule::ethiopia_2026();
    ///
    /// assert_eq!(schedule.pension_rate, dec!(0.07));
    /// assert_eq!(schedule.employment_brackets.resolve(dec!(4650)).rate, dec!(0.20));
    /// ```
    pub fn ethiopia_2026() -> Self {
        Self {
            pension_rate: dec!(0.07),
            charity_cap_rate: dec!(0.10),
            minimum_alternative_tax_rate: dec!(0.025),
            vat_rate: dec!(0.15),
            plc_rate: dec!(0.30),
            employment_brackets: BracketTable::from_static(&EMPLOYMENT_BRACKETS),
            sole_proprietor_brackets: BracketTable::from_static(&SOLE_PROPRIETOR_BRACKETS),
            small_business_brackets: BracketTable::from_static(&SMALL_BUSINESS_BRACKETS),
        }
    }

    /// A process-wide, read-only instance of [`RateSchedule::ethiopia_2026`].
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Checks that every scalar rate lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`RateScheduleError::RateOutOfRange`] naming the first
    /// offending rate.
    pub fn validate(&self) -> Result<(), RateScheduleError> {
        let rates = [
            ("pension_rate", self.pension_rate),
            ("charity_cap_rate", self.charity_cap_rate),
            (
                "minimum_alternative_tax_rate",
                self.minimum_alternative_tax_rate,
            ),
            ("vat_rate", self.vat_rate),
            ("plc_rate", self.plc_rate),
        ];

        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(RateScheduleError::RateOutOfRange { name, rate });
            }
        }
        Ok(())
    }
}

impl Default for RateSchedule {
    fn default() -> Self {
        Self::ethiopia_2026()
    }
}
