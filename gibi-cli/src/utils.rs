use gibi_core::calculations::common::MAX_AMOUNT;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a typed amount into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseAmountError {
        input: s.to_string(),
        source: e,
    })
}

/// Coerces a typed amount into a non-negative [`Decimal`].
///
/// Missing, empty, malformed, negative and out-of-range amounts all become 0.
/// Anything but a missing or empty amount is logged with the field name so the
/// user can see what was ignored. Amounts above [`MAX_AMOUNT`] are out of
/// range, as are digit strings too long for a `Decimal`.
pub fn coerce_amount(
    field: &str,
    s: Option<&str>,
) -> Decimal {
    let Some(s) = s else {
        return Decimal::ZERO;
    };

    match parse_amount(s) {
        Ok(amount) if amount < Decimal::ZERO => {
            warn!(field, input = %s, "negative amount treated as 0");
            Decimal::ZERO
        }
        Ok(amount) if amount > MAX_AMOUNT => {
            warn!(field, input = %s, max = %MAX_AMOUNT, "amount above the ceiling treated as 0");
            Decimal::ZERO
        }
        Ok(amount) => amount,
        Err(error) => {
            warn!(field, %error, "unparseable amount treated as 0");
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("600,000").unwrap(), dec!(600000));
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_amount_empty_treated_as_zero() {
        assert_eq!(parse_amount("").unwrap(), dec!(0));
        assert_eq!(parse_amount("   ").unwrap(), dec!(0));
    }

    #[test]
    fn parse_amount_rejects_text() {
        let err = parse_amount("lots").unwrap_err();

        assert!(err.to_string().starts_with("invalid amount 'lots'"));
    }

    #[test]
    fn coerce_amount_defaults_missing_to_zero() {
        assert_eq!(coerce_amount("salary", None), dec!(0));
    }

    #[test]
    fn coerce_amount_zeroes_malformed_input() {
        assert_eq!(coerce_amount("salary", Some("12abc")), dec!(0));
    }

    #[test]
    fn coerce_amount_zeroes_negative_input() {
        assert_eq!(coerce_amount("salary", Some("-5000")), dec!(0));
    }

    #[test]
    fn coerce_amount_zeroes_amounts_above_the_ceiling() {
        assert_eq!(coerce_amount("sales", Some("1,000,000,000,000,001")), dec!(0));
        assert_eq!(coerce_amount("sales", Some("79228162514264337593543950335")), dec!(0));
        assert_eq!(coerce_amount("sales", Some("99999999999999999999999999999999")), dec!(0));
        assert_eq!(coerce_amount("sales", Some("1,000,000,000,000,000")), MAX_AMOUNT);
    }

    #[test]
    fn coerce_amount_passes_valid_input() {
        assert_eq!(coerce_amount("salary", Some("5,000.50")), dec!(5000.50));
    }
}
