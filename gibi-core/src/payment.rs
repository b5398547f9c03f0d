//! Manual payment review.
//!
//! A payment starts [`PaymentStatus::Pending`] and an administrator moves it
//! once, to approved or rejected. Approval produces the [`TaxReport`] to
//! deliver and records where it is filed. Records live in memory only.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{TaxData, TaxReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Result<Self, PaymentError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(PaymentError::UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("unknown payment status '{0}'")]
    UnknownStatus(String),

    #[error("payment {id} was already {status}")]
    AlreadyReviewed { id: String, status: PaymentStatus },

    #[error("a review must approve or reject the payment")]
    PendingDecision,
}

/// A payment awaiting or past review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    /// Telegram chat the report is delivered to; also printed as the taxpayer.
    pub user_id: String,
    pub status: PaymentStatus,
    pub tax_data: Option<TaxData>,
    /// `reports/<file name>` once a report has been filed.
    pub report_file: Option<String>,
}

impl Payment {
    pub fn pending(
        id: impl Into<String>,
        user_id: impl Into<String>,
        tax_data: Option<TaxData>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            status: PaymentStatus::Pending,
            tax_data,
            report_file: None,
        }
    }

    /// Applies an administrator's decision.
    ///
    /// Approval returns the report to deliver, built from the stored tax data
    /// (an empty payload when none was stored). Rejection returns `None`.
    ///
    /// # Errors
    ///
    /// - [`PaymentError::PendingDecision`] if `decision` is `Pending`.
    /// - [`PaymentError::AlreadyReviewed`] if the payment is no longer pending.
    pub fn review(
        &mut self,
        decision: PaymentStatus,
        date: NaiveDate,
    ) -> Result<Option<TaxReport>, PaymentError> {
        if decision == PaymentStatus::Pending {
            return Err(PaymentError::PendingDecision);
        }
        if self.status != PaymentStatus::Pending {
            return Err(PaymentError::AlreadyReviewed {
                id: self.id.clone(),
                status: self.status,
            });
        }

        self.status = decision;
        info!(payment = %self.id, status = %decision, "payment reviewed");

        if decision == PaymentStatus::Rejected {
            return Ok(None);
        }

        let data = self.tax_data.clone().unwrap_or_default();
        let report = TaxReport::new(self.user_id.clone(), &data, date);
        self.report_file = Some(report.file_reference());
        Ok(Some(report))
    }
}
