//! The lead being filled in, and the metadata stamped on it at submit time.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::category::LoanCategory;
use super::property::{Property, PropertyField};

/// Correlation data generated once per logical submission and attached to
/// both webhook requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionMeta {
    pub lead_id: String,
    /// ISO-8601, UTC, millisecond precision.
    pub created_at: String,
}

impl SubmissionMeta {
    pub fn generate() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            lead_id: format!("lead_{}", uuid::Uuid::new_v4()),
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Everything the user has typed so far. Attachments are not part of the
/// draft; they stay in the file pickers until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    category: Option<LoanCategory>,
    fields: BTreeMap<String, String>,
    multiple_properties: bool,
    properties: Vec<Property>,
}

impl LeadDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<LoanCategory> {
        self.category
    }

    /// Switching category turns the property editor off and drops its blocks.
    pub fn select_category(&mut self, category: Option<LoanCategory>) {
        self.category = category;
        self.multiple_properties = false;
        self.properties.clear();
    }

    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Raw toggle value; see [`LeadDraft::multi_active`] for the effective one.
    pub fn multiple_properties(&self) -> bool {
        self.multiple_properties
    }

    /// True only when the toggle is on and the category supports it.
    pub fn multi_active(&self) -> bool {
        self.multiple_properties
            && self
                .category
                .is_some_and(LoanCategory::supports_multiple_properties)
    }

    /// Turning the editor on seeds two blank blocks; turning it off clears
    /// them. Ignored for categories without multi-property support.
    pub fn set_multiple_properties(&mut self, enabled: bool) {
        if !self
            .category
            .is_some_and(LoanCategory::supports_multiple_properties)
        {
            return;
        }
        self.multiple_properties = enabled;
        if enabled && self.properties.is_empty() {
            self.properties = vec![Property::new(), Property::new()];
        }
        if !enabled {
            self.properties.clear();
        }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn add_property(&mut self) {
        self.properties.push(Property::new());
    }

    pub fn remove_property(&mut self, index: usize) {
        if index < self.properties.len() {
            self.properties.remove(index);
        }
    }

    pub fn update_property(&mut self, index: usize, field: PropertyField, value: impl Into<String>) {
        if let Some(property) = self.properties.get_mut(index) {
            property.set(field, value);
        }
    }

    /// Number of property blocks that will be reported, zero when the
    /// editor is not in effect.
    pub fn reported_property_count(&self) -> usize {
        if self.multi_active() {
            self.properties.len()
        } else {
            0
        }
    }
}
