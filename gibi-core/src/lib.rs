//! Ethiopian tax bracket engine.
//!
//! The engine turns plain numeric inputs for one of four taxpayer categories
//! into an estimated tax and a line-item breakdown. It performs no I/O; the
//! [`report`] and [`payment`] modules model the content handed to the
//! report-delivery workflow once a payment is approved.

pub mod calculations;
pub mod models;
pub mod payment;
pub mod report;

pub use calculations::{
    CalculationLatch, LatchGuard, TaxCalculator, calculate_employment, calculate_plc,
    calculate_small_business, calculate_sole_proprietor,
};
pub use models::*;
pub use payment::{Payment, PaymentError, PaymentStatus};
pub use report::{DELIVERY_CAPTION, TaxData, TaxReport};
