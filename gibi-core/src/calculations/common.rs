//! Common utility functions for tax calculations.
//!
//! Rounding, clamping and the number formats used by every breakdown line.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::warn;

/// Largest amount the engine accepts for a single input field, one
/// quadrillion birr. Larger inputs are saturated so that products with rates
/// and sums of deductions stay inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use gibi_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps a subtotal to zero, the `max(x, 0)` applied after every deduction.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// Clamps a caller-supplied amount into `0..=MAX_AMOUNT`, logging when it
/// was out of range.
///
/// Callers are expected to coerce bad input before calling the engine; this
/// keeps a contract violation from producing a negative tax or an overflow.
pub(crate) fn clamp_input(
    field: &'static str,
    value: Decimal,
) -> Decimal {
    if value < Decimal::ZERO {
        warn!(field, value = %value, "negative input amount clamped to zero");
        return Decimal::ZERO;
    }
    if value > MAX_AMOUNT {
        warn!(field, value = %value, max = %MAX_AMOUNT, "input amount saturated at the ceiling");
        return MAX_AMOUNT;
    }
    value
}

/// Formats an amount as `1234.50 ETB`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use gibi_core::calculations::common::format_amount;
///
/// assert_eq!(format_amount(dec!(930)), "930.00 ETB");
/// assert_eq!(format_amount(dec!(0.125)), "0.13 ETB");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2} ETB", round_half_up(amount))
}

/// Formats a fraction as an integer percentage, e.g. `0.35` as `35%`.
pub fn format_rate(rate: Decimal) -> String {
    let mut percent =
        (rate * Decimal::ONE_HUNDRED).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    percent.rescale(0);
    format!("{percent}%")
}

/// Formats a bracket upper bound as `up to 7000 ETB`, or `up to ∞ ETB` for the
/// unbounded top bracket.
pub fn format_bound(bound: Option<Decimal>) -> String {
    match bound {
        Some(bound) => format!("up to {} ETB", bound.normalize()),
        None => "up to ∞ ETB".to_string(),
    }
}

/// Renders a fraction as a percentage without trailing zeros, for labels such
/// as `MAT (2.5% of turnover)`.
pub fn percent_label(rate: Decimal) -> String {
    (rate * Decimal::ONE_HUNDRED).normalize().to_string()
}
