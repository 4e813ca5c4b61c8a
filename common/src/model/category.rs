use serde::{Deserialize, Serialize};

/// Loan category selected at the top of the form.
///
/// Serialized with its machine code (`"CRE"`, `"WC_LOC"`, ...), which is also
/// the value sent to both webhooks as `loan_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoanCategory {
    #[serde(rename = "CRE")]
    CommercialRealEstate,
    #[serde(rename = "DSCR")]
    Dscr,
    #[serde(rename = "BRIDGE")]
    Bridge,
    #[serde(rename = "SBA")]
    Sba,
    #[serde(rename = "EQUIP")]
    Equipment,
    #[serde(rename = "WC_LOC")]
    WorkingCapital,
    #[serde(rename = "FACTOR")]
    Factoring,
    #[serde(rename = "FRANCHISE")]
    Franchise,
    #[serde(rename = "SPECIALTY_AV")]
    Aviation,
    #[serde(rename = "OTHER")]
    Other,
}

impl LoanCategory {
    /// Selector order.
    pub const ALL: [LoanCategory; 10] = [
        LoanCategory::CommercialRealEstate,
        LoanCategory::Dscr,
        LoanCategory::Bridge,
        LoanCategory::Sba,
        LoanCategory::Equipment,
        LoanCategory::WorkingCapital,
        LoanCategory::Factoring,
        LoanCategory::Franchise,
        LoanCategory::Aviation,
        LoanCategory::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            LoanCategory::CommercialRealEstate => "CRE",
            LoanCategory::Dscr => "DSCR",
            LoanCategory::Bridge => "BRIDGE",
            LoanCategory::Sba => "SBA",
            LoanCategory::Equipment => "EQUIP",
            LoanCategory::WorkingCapital => "WC_LOC",
            LoanCategory::Factoring => "FACTOR",
            LoanCategory::Franchise => "FRANCHISE",
            LoanCategory::Aviation => "SPECIALTY_AV",
            LoanCategory::Other => "OTHER",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoanCategory::CommercialRealEstate => "Commercial Real Estate",
            LoanCategory::Dscr => "DSCR / Long-Term Rental",
            LoanCategory::Bridge => "Bridge / Fix & Flip",
            LoanCategory::Sba => "SBA",
            LoanCategory::Equipment => "Equipment",
            LoanCategory::WorkingCapital => "Working Capital / Line of Credit",
            LoanCategory::Factoring => "Factoring (Invoice Financing)",
            LoanCategory::Franchise => "Franchise",
            LoanCategory::Aviation => "Aviation",
            LoanCategory::Other => "Other / General",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Whether the repeatable property editor is offered for this category.
    pub fn supports_multiple_properties(self) -> bool {
        matches!(
            self,
            LoanCategory::CommercialRealEstate
                | LoanCategory::Dscr
                | LoanCategory::Bridge
                | LoanCategory::Other
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for category in LoanCategory::ALL {
            assert_eq!(LoanCategory::from_code(category.code()), Some(category));
        }
        assert_eq!(LoanCategory::from_code("cre"), None);
    }

    #[test]
    fn test_serde_uses_machine_code() {
        let json = serde_json::to_string(&LoanCategory::WorkingCapital).unwrap();
        assert_eq!(json, "\"WC_LOC\"");
        let parsed: LoanCategory = serde_json::from_str("\"SPECIALTY_AV\"").unwrap();
        assert_eq!(parsed, LoanCategory::Aviation);
    }

    #[test]
    fn test_multi_property_support() {
        let supported: Vec<_> = LoanCategory::ALL
            .into_iter()
            .filter(|c| c.supports_multiple_properties())
            .map(LoanCategory::code)
            .collect();
        assert_eq!(supported, vec!["CRE", "DSCR", "BRIDGE", "OTHER"]);
    }
}
