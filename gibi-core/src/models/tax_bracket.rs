//! Bracket tables and the shared bracket resolver.
//!
//! A [`BracketTable`] is an ordered list of `(upper bound, rate)` pairs. The
//! last bracket has no upper bound and catches every base above the previous
//! bound. Resolution uses inclusive upper bounds: a base equal to a bound
//! lands in that bracket, not the next one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of a bracket table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound, or `None` for the unbounded top bracket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub const fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub const fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }

    /// Returns `true` if `base` is at or below this bracket's upper bound.
    pub fn covers(
        &self,
        base: Decimal,
    ) -> bool {
        match self.upper_bound {
            Some(bound) => base <= bound,
            None => true,
        }
    }
}

/// Errors raised when a bracket table violates its invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table must contain at least one bracket")]
    Empty,

    #[error("upper bound {bound} at position {index} does not exceed previous bound {previous}")]
    NonIncreasingBound {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    #[error("unbounded bracket at position {index} must be the last bracket")]
    UnboundedNotLast { index: usize },

    #[error("last bracket must be unbounded, got upper bound {0}")]
    MissingUnbounded(Decimal),

    #[error("rate at position {index} must be between 0 and 1, got {rate}")]
    RateOutOfRange { index: usize, rate: Decimal },
}

/// An immutable, validated bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Builds a table after checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] if the table is empty, bounds are not
    /// strictly increasing, the unbounded bracket is missing or not last, or a
    /// rate falls outside `[0, 1]`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use gibi_core::{BracketTable, TaxBracket};
    ///
    /// let table = BracketTable::new(vec![
    ///     TaxBracket::bounded(dec!(1000), dec!(0.00)),
    ///     TaxBracket::unbounded(dec!(0.10)),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(table.resolve(dec!(1000)).rate, dec!(0.00));
    /// assert_eq!(table.resolve(dec!(1000.01)).rate, dec!(0.10));
    /// ```
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketTableError> {
        Self::check(&brackets)?;
        Ok(Self { brackets })
    }

    /// Builds one of the shipped tables, whose invariants hold by construction.
    pub(crate) fn from_static(brackets: &[TaxBracket]) -> Self {
        debug_assert_eq!(Self::check(brackets), Ok(()));
        Self {
            brackets: brackets.to_vec(),
        }
    }

    fn check(brackets: &[TaxBracket]) -> Result<(), BracketTableError> {
        let last_index = match brackets.len() {
            0 => return Err(BracketTableError::Empty),
            n => n - 1,
        };

        let mut previous: Option<Decimal> = None;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(BracketTableError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }

            match bracket.upper_bound {
                None if index != last_index => {
                    return Err(BracketTableError::UnboundedNotLast { index });
                }
                None => {}
                Some(bound) if index == last_index => {
                    return Err(BracketTableError::MissingUnbounded(bound));
                }
                Some(bound) => {
                    if let Some(prev) = previous {
                        if bound <= prev {
                            return Err(BracketTableError::NonIncreasingBound {
                                index,
                                bound,
                                previous: prev,
                            });
                        }
                    }
                    previous = Some(bound);
                }
            }
        }

        Ok(())
    }

    /// Returns the bracket that applies to `base`.
    ///
    /// Scans in ascending order and returns the first bracket whose upper
    /// bound is at or above `base`. Bases above every finite bound resolve to
    /// the unbounded top bracket. Callers clamp negative bases to zero first;
    /// a negative base would resolve to the first bracket.
    pub fn resolve(
        &self,
        base: Decimal,
    ) -> &TaxBracket {
        self.brackets
            .iter()
            .find(|bracket| bracket.covers(base))
            .unwrap_or_else(|| self.top())
    }

    /// The unbounded top bracket.
    pub fn top(&self) -> &TaxBracket {
        // Non-empty by construction.
        &self.brackets[self.brackets.len() - 1]
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns `true` if no bracket carries a lower rate than the one below it.
    pub fn is_rate_non_decreasing(&self) -> bool {
        self.brackets.windows(2).all(|pair| pair[0].rate <= pair[1].rate)
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketTable {
    type Error = BracketTableError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketTable> for Vec<TaxBracket> {
    fn from(table: BracketTable) -> Self {
        table.brackets
    }
}
