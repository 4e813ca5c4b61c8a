//! Serialization of the property blocks into the single `properties_json`
//! form field.
//!
//! Two encodings exist:
//! - [`PropertiesEncoding::LabeledText`]: a readable report, UTF-8 encoded
//!   and then base64 encoded so it survives any form transport intact.
//! - [`PropertiesEncoding::Json`]: a JSON array of `field -> value` objects.
//!
//! Both are category aware and both decode back to the same values.
//!
//! Report layout:
//!
//! ```text
//! Collateral / Property Information:
//! • Property #1
//!    - Property Address: 12 Main St
//!    - Renovation Scope: new roof
//!      second line of the same value
//! • Property #2
//!
//! ```

use std::collections::BTreeMap;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::model::{LoanCategory, Property, PropertyField};

const REPORT_HEADING: &str = "Collateral / Property Information:";
const BLOCK_PREFIX: &str = "• Property #";
const ITEM_PREFIX: &str = "   - ";
const CONTINUATION_PREFIX: &str = "     ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertiesEncoding {
    #[default]
    LabeledText,
    Json,
}

/// Encodes `properties` for `category`.
///
/// Returns an empty string when the property editor is not in effect
/// (`multi_mode` off, or a category without multi-property support),
/// whatever `properties` holds.
pub fn encode_properties(
    encoding: PropertiesEncoding,
    category: LoanCategory,
    multi_mode: bool,
    properties: &[Property],
) -> String {
    if !multi_mode || !category.supports_multiple_properties() {
        return String::new();
    }
    match encoding {
        PropertiesEncoding::LabeledText => {
            general_purpose::STANDARD.encode(properties_report(category, properties))
        }
        PropertiesEncoding::Json => properties_json(category, properties),
    }
}

/// Decodes a `properties_json` value. The empty string decodes to no
/// properties for either encoding.
pub fn decode_properties(
    encoding: PropertiesEncoding,
    payload: &str,
) -> Result<Vec<Property>, DecodeError> {
    if payload.is_empty() {
        return Ok(Vec::new());
    }
    match encoding {
        PropertiesEncoding::LabeledText => {
            let bytes = general_purpose::STANDARD.decode(payload)?;
            parse_report(&String::from_utf8(bytes)?)
        }
        PropertiesEncoding::Json => {
            let rows: Vec<BTreeMap<String, String>> = serde_json::from_str(payload)?;
            rows.into_iter()
                .map(|row| {
                    let mut property = Property::new();
                    for (key, value) in row {
                        let field = PropertyField::from_key(&key)
                            .ok_or(DecodeError::UnknownField(key))?;
                        property.set(field, value);
                    }
                    Ok(property)
                })
                .collect()
        }
    }
}

/// Human-readable report, before base64. Empty when there are no properties.
pub fn properties_report(category: LoanCategory, properties: &[Property]) -> String {
    if properties.is_empty() {
        return String::new();
    }
    let mut lines = vec![REPORT_HEADING.to_string()];
    for (index, property) in properties.iter().enumerate() {
        let mut block = format!("{BLOCK_PREFIX}{}", index + 1);
        for (field, value) in property.values_for(category) {
            let value = value.replace('\n', &format!("\n{CONTINUATION_PREFIX}"));
            block.push('\n');
            block.push_str(&format!("{ITEM_PREFIX}{}: {value}", field.report_label()));
        }
        lines.push(block);
    }
    lines.push(String::new());
    lines.join("\n")
}

fn properties_json(category: LoanCategory, properties: &[Property]) -> String {
    let rows: Vec<BTreeMap<&str, &str>> = properties
        .iter()
        .map(|p| p.values_for(category).map(|(f, v)| (f.key(), v)).collect())
        .collect();
    // A map of strings always serializes.
    serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
}

fn parse_report(text: &str) -> Result<Vec<Property>, DecodeError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let mut properties: Vec<Property> = Vec::new();
    let mut last_field: Option<PropertyField> = None;
    let lines: Vec<&str> = text.split('\n').collect();
    let malformed = |line: usize, content: &str| DecodeError::MalformedReport {
        line: line + 1,
        content: content.to_string(),
    };

    for (number, &line) in lines.iter().enumerate() {
        if number == 0 {
            if line != REPORT_HEADING {
                return Err(malformed(number, line));
            }
            continue;
        }
        if let Some(rest) = line.strip_prefix(CONTINUATION_PREFIX) {
            let (Some(property), Some(field)) = (properties.last_mut(), last_field) else {
                return Err(malformed(number, line));
            };
            let value = format!("{}\n{rest}", property.get(field).unwrap_or_default());
            property.set(field, value);
        } else if let Some(rest) = line.strip_prefix(ITEM_PREFIX) {
            let Some(property) = properties.last_mut() else {
                return Err(malformed(number, line));
            };
            let (field, value) = split_item(rest).ok_or_else(|| malformed(number, line))?;
            property.set(field, value);
            last_field = Some(field);
        } else if line.starts_with(BLOCK_PREFIX) {
            properties.push(Property::new());
            last_field = None;
        } else if line.is_empty() && number == lines.len() - 1 {
            break;
        } else {
            return Err(malformed(number, line));
        }
    }
    Ok(properties)
}

fn split_item(rest: &str) -> Option<(PropertyField, &str)> {
    PropertyField::REPORT_ORDER.into_iter().find_map(|field| {
        rest.strip_prefix(field.report_label())
            .and_then(|r| r.strip_prefix(": "))
            .map(|value| (field, value))
    })
}
