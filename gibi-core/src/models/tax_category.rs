use std::fmt;

use serde::{Deserialize, Serialize};

/// The taxpayer categories the engine knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxCategory {
    Employment,
    SoleProprietor,
    SmallBusiness,
    Plc,
}

/// The period an input amount covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxPeriod {
    Monthly,
    Annual,
}

impl TaxPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }
}

impl fmt::Display for TaxPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TaxCategory {
    pub const ALL: [TaxCategory; 4] = [
        Self::Employment,
        Self::SoleProprietor,
        Self::SmallBusiness,
        Self::Plc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employment => "employment",
            Self::SoleProprietor => "sole_proprietor",
            Self::SmallBusiness => "small_business",
            Self::Plc => "plc",
        }
    }

    /// Parses a category slug. Hyphens are accepted in place of underscores
    /// and matching is case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "employment" => Some(Self::Employment),
            "sole_proprietor" => Some(Self::SoleProprietor),
            "small_business" => Some(Self::SmallBusiness),
            "plc" => Some(Self::Plc),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Employment => "Employment",
            Self::SoleProprietor => "Sole Proprietor",
            Self::SmallBusiness => "Small Business (Category B)",
            Self::Plc => "PLC / Share Company",
        }
    }

    /// Employment salaries are monthly; every business category is annual.
    pub fn period(&self) -> TaxPeriod {
        match self {
            Self::Employment => TaxPeriod::Monthly,
            _ => TaxPeriod::Annual,
        }
    }
}

impl fmt::Display for TaxCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_slug() {
        for category in TaxCategory::ALL {
            assert_eq!(TaxCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn parse_accepts_hyphens_and_mixed_case() {
        assert_eq!(
            TaxCategory::parse("Sole-Proprietor"),
            Some(TaxCategory::SoleProprietor)
        );
        assert_eq!(TaxCategory::parse(" PLC "), Some(TaxCategory::Plc));
    }

    #[test]
    fn parse_rejects_unknown_slug() {
        assert_eq!(TaxCategory::parse("partnership"), None);
        assert_eq!(TaxCategory::parse(""), None);
    }

    #[test]
    fn only_employment_is_monthly() {
        assert_eq!(TaxCategory::Employment.period(), TaxPeriod::Monthly);
        assert_eq!(TaxCategory::SoleProprietor.period(), TaxPeriod::Annual);
        assert_eq!(TaxCategory::SmallBusiness.period(), TaxPeriod::Annual);
        assert_eq!(TaxCategory::Plc.period(), TaxPeriod::Annual);
    }

    #[test]
    fn period_serializes_as_its_display_name() {
        for period in [TaxPeriod::Monthly, TaxPeriod::Annual] {
            let json = serde_json::to_value(period).unwrap();

            assert_eq!(json, period.as_str());
            assert_eq!(period.to_string(), period.as_str());
        }
    }
}
