//! Static question and document catalog.
//!
//! Maps each loan category to the top-level questions and the document
//! uploads it asks for. Pure data plus two lookups used by the view.

use crate::model::LoanCategory;

/// How a top-level field is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    /// The attribution drop-down, see [`HEARD_ABOUT_OPTIONS`].
    HeardAbout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentInput {
    /// Multipart field name. Names ending in `[]` take several files.
    pub name: &'static str,
    pub label: &'static str,
    pub multiple: bool,
}

pub const HEARD_ABOUT: &str = "heard_about";
pub const HEARD_ABOUT_OTHER: &str = "heard_about_other";
pub const HEARD_ABOUT_OPTIONS: [&str; 4] = ["Andrew", "Marty", "Facebook", "Other"];

/// Shown for every category.
pub const UNIVERSAL_FIELDS: [&str; 23] = [
    "full_name",
    "email",
    "mobile_phone",
    "business_legal_name",
    "business_street",
    "business_city",
    "business_state",
    "business_zip",
    "entity_type",
    "year_business_started",
    "industry",
    "business_description",
    "owners_list",
    "amount_requested",
    "use_of_funds",
    "ideal_timing",
    "estimated_credit_word",
    "revenue_last_year",
    "revenue_ytd",
    "profitability",
    "existing_debt_summary",
    HEARD_ABOUT,
    HEARD_ABOUT_OTHER,
];

const TEXTAREA_FIELDS: [&str; 3] = ["business_description", "other_notes", "renovation_scope"];

pub fn category_fields(category: LoanCategory) -> &'static [&'static str] {
    match category {
        LoanCategory::CommercialRealEstate => &[
            "property_address",
            "property_type",
            "structure_size",
            "year_built_condition",
            "purchase_price",
            "current_value",
            "renovation_scope",
            "capex_budget",
            "occupancy_status",
            "occupancy_pct",
            "current_management",
            "current_noi",
            "t12_noi",
            "gross_monthly_rent",
            "vacancy_pct",
            "projected_noi",
            "stabilized_dscr",
        ],
        LoanCategory::Dscr => &[
            "property_address",
            "property_type",
            "structure_size",
            "year_built_condition",
            "occupancy_status",
            "dscr_status",
            "dscr_rent_current",
            "dscr_rent_expected",
            "dscr_annual_taxes",
            "dscr_annual_insurance",
            "dscr_recurring_fees",
            "stabilized_dscr",
        ],
        LoanCategory::Bridge => &[
            "property_address",
            "property_type",
            "year_built_condition",
            "renovation_scope",
            "capex_budget",
            "bridge_arv",
            "bridge_timeline",
            "bridge_exit_strategy",
            "projected_noi",
            "stabilized_dscr",
        ],
        LoanCategory::Sba => &[
            "property_address",
            "property_type",
            "structure_size",
            "year_built_condition",
            "renovation_scope",
            "occupancy_status",
            "revenue_last_year",
            "revenue_ytd",
            "profitability",
            "sba_purpose",
            "sba_owners_20plus",
            "sba_taxes_current",
            "sba_pg_all",
            "sba_collateral_available",
            "sba_other_businesses",
        ],
        LoanCategory::Equipment => &[
            "equip_type",
            "equip_new_or_used",
            "equip_purchase_price",
            "equip_vendor",
            "equip_useful_life",
            "equip_use_case",
        ],
        LoanCategory::WorkingCapital => &[
            "wc_structure",
            "wc_amount_basis",
            "wc_ar_balance_dso",
            "wc_existing_locs",
            "wc_seasonality",
            "revenue_last_year",
            "revenue_ytd",
        ],
        LoanCategory::Factoring => &[
            "fact_avg_monthly_invoiced",
            "fact_customer_types",
            "fact_payment_terms",
            "fact_concentration",
            "fact_past_due_or_disputed",
            "fact_recent_slowing",
        ],
        LoanCategory::Franchise => &[
            "fran_brand",
            "fran_stage",
            "fran_has_fdd",
            "fran_location_status",
            "fran_total_project_cost",
            "fran_cash_injection",
            "fran_other_funding",
            "fran_experience",
        ],
        LoanCategory::Aviation => &[
            "av_aircraft_type",
            "av_txn_type",
            "av_intended_use",
            "av_base",
            "av_annual_hours",
        ],
        LoanCategory::Other => &["other_notes"],
    }
}

/// Top-level questions for the current selection. With the property editor
/// active the property questions move into the editor, so only the
/// universal set remains at top level. A key listed twice is shown once.
pub fn visible_fields(category: Option<LoanCategory>, multi_active: bool) -> Vec<FieldSpec> {
    let specific: &'static [&'static str] = match category {
        Some(category) if !multi_active => category_fields(category),
        _ => &[],
    };
    let mut keys: Vec<&'static str> = Vec::with_capacity(UNIVERSAL_FIELDS.len() + specific.len());
    for key in UNIVERSAL_FIELDS.iter().chain(specific) {
        if !keys.contains(key) {
            keys.push(*key);
        }
    }
    keys.into_iter().map(field_spec).collect()
}

pub fn field_spec(key: &'static str) -> FieldSpec {
    let kind = if key == HEARD_ABOUT {
        FieldKind::HeardAbout
    } else if TEXTAREA_FIELDS.contains(&key) {
        FieldKind::TextArea
    } else {
        FieldKind::Text
    };
    FieldSpec {
        key,
        label: label(key),
        kind,
    }
}

/// Form label for a field key; unknown keys label themselves.
pub fn label(key: &str) -> &str {
    match key {
        "full_name" => "Full Name",
        "email" => "Email",
        "mobile_phone" => "Mobile Phone",
        "business_legal_name" => "Business Legal Name",
        "business_street" => "Business Street Address",
        "business_city" => "Business City",
        "business_state" => "Business State",
        "business_zip" => "Business ZIP",
        "entity_type" => "Type of Entity (LLC, Corp, Partnership, Sole Prop)",
        "year_business_started" => "Year Business Started",
        "industry" => "Industry",
        "business_description" => "Briefly describe what your business does",
        "owners_list" => "List all owners & ownership percentages",
        "amount_requested" => "Requested Loan Amount (USD)",
        "use_of_funds" => "How will you use the funds?",
        "ideal_timing" => "Target close date or timeframe",
        "estimated_credit_word" => {
            "How would you describe your personal credit? (Poor / Fair / Good / Excellent)"
        }
        "revenue_last_year" => "Approximate gross revenue (last full year)",
        "revenue_ytd" => "Approximate gross revenue (year-to-date)",
        "profitability" => "Is the business profitable, breakeven, or at a loss?",
        "existing_debt_summary" => "Existing business debt (lenders, balances, monthly payments)",
        "property_address" => "Property Address",
        "property_type" => "Property Type (e.g., multifamily, retail, SFR, etc.)",
        "structure_size" => "Square Footage / Units / Beds",
        "year_built_condition" => "Year Built / Current Condition",
        "purchase_price" => "Purchase Price (if applicable, USD)",
        "current_value" => "Current Value (if known, USD)",
        "renovation_scope" => "Planned renovations / scope",
        "capex_budget" => "CapEx / Renovation Budget (USD)",
        "occupancy_status" => "Occupancy Status (occupied / vacant / lease-up / stabilized)",
        "occupancy_pct" => "Occupancy Percentage (%)",
        "current_management" => "Current management (self-managed or third-party)",
        "current_noi" => "Current NOI (annual, USD)",
        "t12_noi" => "Trailing-12 NOI (annual, USD)",
        "gross_monthly_rent" => "Gross Monthly Rent (USD)",
        "vacancy_pct" => "Vacancy Percentage (%)",
        "projected_noi" => "Projected NOI after plan (annual, USD)",
        "stabilized_dscr" => "Stabilized DSCR (if known)",
        "dscr_status" => "Is this a purchase or a refinance?",
        "dscr_annual_taxes" => "Annual property taxes (USD)",
        "dscr_annual_insurance" => "Annual insurance (USD)",
        "dscr_recurring_fees" => "HOA or other recurring property fees (USD)",
        "dscr_rent_current" => "Current total monthly rent (USD)",
        "dscr_rent_expected" => "Expected total monthly rent (USD)",
        "bridge_arv" => "Estimated After-Repair Value (ARV, USD)",
        "bridge_timeline" => "Expected timeline (rehab/hold to exit)",
        "bridge_exit_strategy" => "Exit strategy (sell, refi to long-term, etc.)",
        "sba_purpose" => "SBA purpose / use of proceeds (RE, acquisition, WC, equipment, etc.)",
        "sba_owners_20plus" => "Owners 20%+ (names & ownership percentages)",
        "sba_taxes_current" => "Are all business & personal taxes current? (Yes/No + details)",
        "sba_pg_all" => "Will all 20%+ owners personally guarantee? (Yes/No)",
        "sba_collateral_available" => {
            "Business/personal collateral available (RE, equipment, investments, etc.)"
        }
        "sba_other_businesses" => "Do any owners have other businesses? (Yes/No + brief list)",
        "equip_type" => "Equipment type (make/model/year, key specs)",
        "equip_new_or_used" => "Is the equipment new or used?",
        "equip_purchase_price" => "Equipment purchase price (incl. tax/shipping/install)",
        "equip_vendor" => "Vendor/dealer name (quote/invoice?)",
        "equip_useful_life" => "Expected useful life (years)",
        "equip_use_case" => "How will the equipment be used in the business?",
        "wc_structure" => "Are you seeking a one-time loan, a revolving LOC, or either?",
        "wc_amount_basis" => "Basis for amount (A/R, Inventory, Revenue)",
        "wc_ar_balance_dso" => "Typical A/R balance and average days outstanding (DSO)",
        "wc_existing_locs" => "Existing lines of credit (limits, usage, lenders)",
        "wc_seasonality" => "Seasonality (busy/slow periods)",
        "fact_avg_monthly_invoiced" => "Average monthly invoiced sales (USD)",
        "fact_customer_types" => "Typical customer types (enterprise, gov, SMB, etc.)",
        "fact_payment_terms" => "Standard payment terms (Net 30/45/60, etc.)",
        "fact_concentration" => "Any customer concentration over ~20–25%?",
        "fact_past_due_or_disputed" => "Past-due or disputed invoices? (brief details)",
        "fact_recent_slowing" => "Any recent slowing of payments/orders?",
        "fran_brand" => "Franchise brand",
        "fran_stage" => "Is this a new location, resale, or expansion?",
        "fran_has_fdd" => "Do you have an FDD (Franchise Disclosure Document)? (Yes/No)",
        "fran_location_status" => "Location/site status",
        "fran_total_project_cost" => "Total project cost",
        "fran_cash_injection" => "Personal cash injection (USD)",
        "fran_other_funding" => "Other funding sources",
        "fran_experience" => "Relevant operating/industry experience",
        "av_aircraft_type" => "Aircraft make/model/year (airframe/engine hours if known)",
        "av_txn_type" => "Transaction type (purchase/refi)",
        "av_intended_use" => "Intended use (personal/business/charter/mixed)",
        "av_base" => "Home base airport",
        "av_annual_hours" => "Expected annual flight hours",
        "other_notes" => "Notes about your request (anything else we should know)",
        HEARD_ABOUT => "How did you hear about us?",
        HEARD_ABOUT_OTHER => "If Other, please specify",
        other => other,
    }
}

pub const ALL_DOCUMENTS: [DocumentInput; 15] = [
    doc("doc_pfs", "Personal Financial Statement"),
    doc("doc_personal_tax_returns[]", "Personal Tax Returns (multi)"),
    doc("doc_entity_docs[]", "Entity Documents (multi)"),
    doc("doc_purchase_contract", "Purchase/Lease Contract or Agreement"),
    doc("doc_rent_roll", "Rent Roll"),
    doc("doc_t12", "T12 (Trailing-12 Financials)"),
    doc("doc_business_tax_returns[]", "Business Tax Returns (multi)"),
    doc("doc_ytd_pl_bs", "YTD P&L + Balance Sheet"),
    doc("doc_bank_statements[]", "Business Bank Statements (multi)"),
    doc("doc_resume_bio", "Owner Resume / Bio"),
    doc("doc_insurance_quote", "Insurance Quote (if applicable)"),
    doc("doc_construction_budget", "Construction/Build-Out Budget (if applicable)"),
    doc("doc_draw_schedule", "Draw Schedule (if applicable)"),
    doc("doc_environmental_report", "Environmental Report (if any)"),
    doc("doc_survey", "Survey (if any)"),
];

const fn doc(name: &'static str, label: &'static str) -> DocumentInput {
    let bytes = name.as_bytes();
    let multiple = bytes.len() >= 2 && bytes[bytes.len() - 2] == b'[' && bytes[bytes.len() - 1] == b']';
    DocumentInput {
        name,
        label,
        multiple,
    }
}

fn category_documents(category: LoanCategory) -> &'static [&'static str] {
    match category {
        LoanCategory::CommercialRealEstate => &[
            "doc_pfs",
            "doc_entity_docs[]",
            "doc_purchase_contract",
            "doc_rent_roll",
            "doc_t12",
            "doc_business_tax_returns[]",
            "doc_ytd_pl_bs",
            "doc_bank_statements[]",
            "doc_insurance_quote",
            "doc_construction_budget",
            "doc_draw_schedule",
            "doc_environmental_report",
            "doc_survey",
        ],
        LoanCategory::Dscr => &[
            "doc_pfs",
            "doc_purchase_contract",
            "doc_rent_roll",
            "doc_t12",
            "doc_bank_statements[]",
            "doc_insurance_quote",
        ],
        LoanCategory::Bridge => &[
            "doc_pfs",
            "doc_entity_docs[]",
            "doc_purchase_contract",
            "doc_construction_budget",
            "doc_draw_schedule",
            "doc_bank_statements[]",
            "doc_business_tax_returns[]",
        ],
        LoanCategory::Sba => &[
            "doc_pfs",
            "doc_personal_tax_returns[]",
            "doc_business_tax_returns[]",
            "doc_entity_docs[]",
            "doc_ytd_pl_bs",
            "doc_bank_statements[]",
            "doc_resume_bio",
        ],
        LoanCategory::Equipment => &[
            "doc_pfs",
            "doc_business_tax_returns[]",
            "doc_ytd_pl_bs",
            "doc_bank_statements[]",
            "doc_purchase_contract",
        ],
        LoanCategory::WorkingCapital => &[
            "doc_business_tax_returns[]",
            "doc_ytd_pl_bs",
            "doc_bank_statements[]",
        ],
        LoanCategory::Factoring => &["doc_business_tax_returns[]", "doc_bank_statements[]"],
        LoanCategory::Franchise => &[
            "doc_pfs",
            "doc_personal_tax_returns[]",
            "doc_business_tax_returns[]",
            "doc_entity_docs[]",
            "doc_bank_statements[]",
            "doc_resume_bio",
            "doc_purchase_contract",
        ],
        LoanCategory::Aviation => &[
            "doc_pfs",
            "doc_personal_tax_returns[]",
            "doc_entity_docs[]",
            "doc_business_tax_returns[]",
            "doc_insurance_quote",
            "doc_bank_statements[]",
        ],
        LoanCategory::Other => &[
            "doc_pfs",
            "doc_business_tax_returns[]",
            "doc_ytd_pl_bs",
            "doc_bank_statements[]",
            "doc_entity_docs[]",
        ],
    }
}

/// Upload inputs for `category`, in catalog order.
pub fn documents_for(category: LoanCategory) -> Vec<&'static DocumentInput> {
    let wanted = category_documents(category);
    ALL_DOCUMENTS
        .iter()
        .filter(|d| wanted.contains(&d.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyField;

    #[test]
    fn test_visible_fields_without_category() {
        let fields = visible_fields(None, false);
        assert_eq!(fields.len(), UNIVERSAL_FIELDS.len());
        assert_eq!(fields[0].key, "full_name");
        assert!(fields.iter().any(|f| f.kind == FieldKind::HeardAbout));
    }

    #[test]
    fn test_multi_mode_hides_category_questions() {
        let single = visible_fields(Some(LoanCategory::CommercialRealEstate), false);
        let multi = visible_fields(Some(LoanCategory::CommercialRealEstate), true);
        assert!(single.iter().any(|f| f.key == "property_address"));
        assert!(!multi.iter().any(|f| f.key == "property_address"));
        assert_eq!(multi.len(), UNIVERSAL_FIELDS.len());
    }

    #[test]
    fn test_shared_keys_not_duplicated() {
        let fields = visible_fields(Some(LoanCategory::WorkingCapital), false);
        let revenue = fields.iter().filter(|f| f.key == "revenue_ytd").count();
        assert_eq!(revenue, 1);
    }

    #[test]
    fn test_textarea_kind() {
        assert_eq!(field_spec("other_notes").kind, FieldKind::TextArea);
        assert_eq!(field_spec("email").kind, FieldKind::Text);
    }

    #[test]
    fn test_every_field_has_a_label() {
        for category in LoanCategory::ALL {
            for key in category_fields(category) {
                assert_ne!(label(key), *key, "missing label for {key}");
            }
        }
        for field in PropertyField::REPORT_ORDER {
            assert_ne!(label(field.key()), field.key());
        }
    }

    #[test]
    fn test_documents_in_catalog_order() {
        let docs: Vec<_> = documents_for(LoanCategory::Factoring)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(docs, vec!["doc_business_tax_returns[]", "doc_bank_statements[]"]);

        let dscr = documents_for(LoanCategory::Dscr);
        assert_eq!(dscr.len(), 6);
        assert_eq!(dscr[0].name, "doc_pfs");
    }

    #[test]
    fn test_multiple_flag_follows_name() {
        let multi: Vec<_> = ALL_DOCUMENTS.iter().filter(|d| d.multiple).map(|d| d.name).collect();
        assert_eq!(multi.len(), 4);
        assert!(multi.iter().all(|n| n.ends_with("[]")));
    }
}
