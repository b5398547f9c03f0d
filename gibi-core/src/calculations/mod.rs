//! Tax calculations for the four taxpayer categories.
//!
//! Every variant shares the bracket resolver on
//! [`BracketTable`](crate::BracketTable) and reports its work as an
//! [`Explanation`](crate::Explanation). Calculations are pure: the same input
//! and schedule always produce the same result.

pub mod common;
mod calculator;
mod employment;
mod latch;
mod plc;
mod small_business;
mod sole_proprietor;

pub use calculator::{
    TaxCalculator, calculate_employment, calculate_plc, calculate_small_business,
    calculate_sole_proprietor,
};
pub use latch::{CalculationLatch, LatchGuard};
