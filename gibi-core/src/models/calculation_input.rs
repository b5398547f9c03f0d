use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxCategory;

/// Monthly employment input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmploymentInput {
    /// Monthly gross salary.
    pub salary: Decimal,
}

/// Annual sole proprietor input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoleProprietorInput {
    pub revenue: Decimal,
    pub salaries: Decimal,
    /// Rent and utilities.
    pub rent: Decimal,
    /// Raw materials.
    pub materials: Decimal,
    pub depreciation: Decimal,
    pub interest: Decimal,
    /// Declared charitable giving, before the cap.
    pub charity: Decimal,
}

/// Annual Category B input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmallBusinessInput {
    /// Annual gross sales.
    pub sales: Decimal,
}

/// Annual PLC / share company input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlcInput {
    /// Annual gross sales, VAT included.
    pub sales: Decimal,
    pub salaries: Decimal,
    pub rent: Decimal,
    pub materials: Decimal,
    pub depreciation: Decimal,
    pub interest: Decimal,
    pub other: Decimal,
}

impl SoleProprietorInput {
    /// Salaries, rent, materials, depreciation and interest combined,
    /// saturating at `Decimal::MAX`.
    pub fn operating_deductions(&self) -> Decimal {
        [self.salaries, self.rent, self.materials, self.depreciation, self.interest]
            .into_iter()
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

impl PlcInput {
    /// Every named deduction combined, including `other`, saturating at
    /// `Decimal::MAX`.
    pub fn total_deductions(&self) -> Decimal {
        [
            self.salaries,
            self.rent,
            self.materials,
            self.depreciation,
            self.interest,
            self.other,
        ]
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

/// Input for one calculation, tagged by taxpayer category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum CalculationInput {
    Employment(EmploymentInput),
    SoleProprietor(SoleProprietorInput),
    SmallBusiness(SmallBusinessInput),
    Plc(PlcInput),
}

impl CalculationInput {
    pub fn category(&self) -> TaxCategory {
        match self {
            Self::Employment(_) => TaxCategory::Employment,
            Self::SoleProprietor(_) => TaxCategory::SoleProprietor,
            Self::SmallBusiness(_) => TaxCategory::SmallBusiness,
            Self::Plc(_) => TaxCategory::Plc,
        }
    }

    /// An all-zero input for `category`.
    pub fn empty(category: TaxCategory) -> Self {
        match category {
            TaxCategory::Employment => Self::Employment(EmploymentInput::default()),
            TaxCategory::SoleProprietor => Self::SoleProprietor(SoleProprietorInput::default()),
            TaxCategory::SmallBusiness => Self::SmallBusiness(SmallBusinessInput::default()),
            TaxCategory::Plc => Self::Plc(PlcInput::default()),
        }
    }
}

impl From<EmploymentInput> for CalculationInput {
    fn from(input: EmploymentInput) -> Self {
        Self::Employment(input)
    }
}

impl From<SoleProprietorInput> for CalculationInput {
    fn from(input: SoleProprietorInput) -> Self {
        Self::SoleProprietor(input)
    }
}

impl From<SmallBusinessInput> for CalculationInput {
    fn from(input: SmallBusinessInput) -> Self {
        Self::SmallBusiness(input)
    }
}

impl From<PlcInput> for CalculationInput {
    fn from(input: PlcInput) -> Self {
        Self::Plc(input)
    }
}
