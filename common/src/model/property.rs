//! Repeatable collateral records used by the multi-property editor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::LoanCategory;

/// A field of a property block.
///
/// Declaration order is the order used in the serialized property report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyField {
    PropertyAddress,
    PropertyType,
    StructureSize,
    YearBuiltCondition,
    PurchasePrice,
    CurrentValue,
    RenovationScope,
    CapexBudget,
    OccupancyStatus,
    OccupancyPct,
    CurrentManagement,
    CurrentNoi,
    T12Noi,
    GrossMonthlyRent,
    VacancyPct,
    ProjectedNoi,
    StabilizedDscr,
    DscrAnnualTaxes,
    DscrAnnualInsurance,
    DscrRecurringFees,
    BridgeArv,
    BridgeTimeline,
    BridgeExitStrategy,
}

impl PropertyField {
    pub const REPORT_ORDER: [PropertyField; 23] = [
        PropertyField::PropertyAddress,
        PropertyField::PropertyType,
        PropertyField::StructureSize,
        PropertyField::YearBuiltCondition,
        PropertyField::PurchasePrice,
        PropertyField::CurrentValue,
        PropertyField::RenovationScope,
        PropertyField::CapexBudget,
        PropertyField::OccupancyStatus,
        PropertyField::OccupancyPct,
        PropertyField::CurrentManagement,
        PropertyField::CurrentNoi,
        PropertyField::T12Noi,
        PropertyField::GrossMonthlyRent,
        PropertyField::VacancyPct,
        PropertyField::ProjectedNoi,
        PropertyField::StabilizedDscr,
        PropertyField::DscrAnnualTaxes,
        PropertyField::DscrAnnualInsurance,
        PropertyField::DscrRecurringFees,
        PropertyField::BridgeArv,
        PropertyField::BridgeTimeline,
        PropertyField::BridgeExitStrategy,
    ];

    /// Editor order shared by every category; category-only fields follow.
    const EDITOR_BASE: [PropertyField; 16] = [
        PropertyField::PropertyAddress,
        PropertyField::PropertyType,
        PropertyField::StructureSize,
        PropertyField::YearBuiltCondition,
        PropertyField::PurchasePrice,
        PropertyField::CurrentValue,
        PropertyField::GrossMonthlyRent,
        PropertyField::OccupancyStatus,
        PropertyField::OccupancyPct,
        PropertyField::CurrentManagement,
        PropertyField::RenovationScope,
        PropertyField::CapexBudget,
        PropertyField::CurrentNoi,
        PropertyField::T12Noi,
        PropertyField::ProjectedNoi,
        PropertyField::StabilizedDscr,
    ];

    /// Form key, shared with the top-level field of the same meaning.
    pub fn key(self) -> &'static str {
        match self {
            PropertyField::PropertyAddress => "property_address",
            PropertyField::PropertyType => "property_type",
            PropertyField::StructureSize => "structure_size",
            PropertyField::YearBuiltCondition => "year_built_condition",
            PropertyField::PurchasePrice => "purchase_price",
            PropertyField::CurrentValue => "current_value",
            PropertyField::RenovationScope => "renovation_scope",
            PropertyField::CapexBudget => "capex_budget",
            PropertyField::OccupancyStatus => "occupancy_status",
            PropertyField::OccupancyPct => "occupancy_pct",
            PropertyField::CurrentManagement => "current_management",
            PropertyField::CurrentNoi => "current_noi",
            PropertyField::T12Noi => "t12_noi",
            PropertyField::GrossMonthlyRent => "gross_monthly_rent",
            PropertyField::VacancyPct => "vacancy_pct",
            PropertyField::ProjectedNoi => "projected_noi",
            PropertyField::StabilizedDscr => "stabilized_dscr",
            PropertyField::DscrAnnualTaxes => "dscr_annual_taxes",
            PropertyField::DscrAnnualInsurance => "dscr_annual_insurance",
            PropertyField::DscrRecurringFees => "dscr_recurring_fees",
            PropertyField::BridgeArv => "bridge_arv",
            PropertyField::BridgeTimeline => "bridge_timeline",
            PropertyField::BridgeExitStrategy => "bridge_exit_strategy",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::REPORT_ORDER.into_iter().find(|f| f.key() == key)
    }

    /// Label used in the human-readable property report.
    pub fn report_label(self) -> &'static str {
        match self {
            PropertyField::PropertyAddress => "Property Address",
            PropertyField::PropertyType => "Property Type",
            PropertyField::StructureSize => "Square Footage / Units / Beds",
            PropertyField::YearBuiltCondition => "Year Built / Condition",
            PropertyField::PurchasePrice => "Purchase Price (USD)",
            PropertyField::CurrentValue => "Current Value (USD)",
            PropertyField::RenovationScope => "Renovation Scope",
            PropertyField::CapexBudget => "CapEx Budget (USD)",
            PropertyField::OccupancyStatus => "Occupancy Status",
            PropertyField::OccupancyPct => "Occupancy Percentage (%)",
            PropertyField::CurrentManagement => "Current Management",
            PropertyField::CurrentNoi => "Current NOI (annual, USD)",
            PropertyField::T12Noi => "T12 NOI (annual, USD)",
            PropertyField::GrossMonthlyRent => "Gross Monthly Rent (USD)",
            PropertyField::VacancyPct => "Vacancy Percentage (%)",
            PropertyField::ProjectedNoi => "Projected NOI (annual, USD)",
            PropertyField::StabilizedDscr => "Stabilized DSCR (if known)",
            PropertyField::DscrAnnualTaxes => "Annual Property Taxes (USD)",
            PropertyField::DscrAnnualInsurance => "Annual Insurance (USD)",
            PropertyField::DscrRecurringFees => "Recurring Fees (USD)",
            PropertyField::BridgeArv => "Estimated ARV (USD)",
            PropertyField::BridgeTimeline => "Timeline",
            PropertyField::BridgeExitStrategy => "Exit Strategy",
        }
    }

    /// The only category this field is meaningful for, if it is restricted.
    pub fn exclusive_to(self) -> Option<LoanCategory> {
        match self {
            PropertyField::DscrAnnualTaxes
            | PropertyField::DscrAnnualInsurance
            | PropertyField::DscrRecurringFees => Some(LoanCategory::Dscr),
            PropertyField::BridgeArv
            | PropertyField::BridgeTimeline
            | PropertyField::BridgeExitStrategy => Some(LoanCategory::Bridge),
            _ => None,
        }
    }

    /// Single filter used by both the editor and the encoder.
    pub fn applies_to(self, category: LoanCategory) -> bool {
        self.exclusive_to().is_none_or(|only| only == category)
    }

    pub fn is_multiline(self) -> bool {
        self == PropertyField::RenovationScope
    }

    /// Fields shown in a property block for `category`, in editor order.
    pub fn editor_fields(category: LoanCategory) -> Vec<PropertyField> {
        let extra = Self::REPORT_ORDER
            .into_iter()
            .filter(|f| f.exclusive_to() == Some(category));
        Self::EDITOR_BASE.into_iter().chain(extra).collect()
    }
}

/// One property block of a multi-property lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// List key for the editor; never transmitted.
    pub id: String,
    values: BTreeMap<PropertyField, String>,
}

impl Property {
    pub fn new() -> Self {
        Self {
            id: format!("prop_{}", uuid::Uuid::new_v4()),
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: PropertyField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Stores `value`; an empty value clears the field.
    pub fn set(&mut self, field: PropertyField, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    /// Non-empty values that apply to `category`, in report order.
    pub fn values_for(&self, category: LoanCategory) -> impl Iterator<Item = (PropertyField, &str)> {
        PropertyField::REPORT_ORDER
            .into_iter()
            .filter(move |f| f.applies_to(category))
            .filter_map(|f| self.get(f).map(|v| (f, v)))
    }

    /// Every stored value regardless of category.
    pub fn values(&self) -> impl Iterator<Item = (PropertyField, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

impl Default for Property {
    fn default() -> Self {
        Self::new()
    }
}
