//! Typed request payloads for the two phases of a submission.
//!
//! Each payload carries its form fields twice: once as the request body and
//! once as a query-string backup on the target URL, so the receiver can
//! recover the data from the request line alone if the body is dropped.

use url::Url;
use url::form_urlencoded;

use crate::catalog::{self, HEARD_ABOUT, HEARD_ABOUT_OTHER};
use crate::config::FormConfig;
use crate::encoding::encode_properties;
use crate::model::attachment::files_manifest;
use crate::model::{Attachment, DocumentSelection, LeadDraft, LoanCategory, SubmissionMeta};

/// Ordered key/value pairs with set-or-replace semantics: setting an
/// existing key drops the old pair and appends the new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.0.retain(|(k, _)| *k != key);
        self.0.push((key, value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `application/x-www-form-urlencoded` serialization.
    pub fn to_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// `base` with every field set as a query parameter. Parameters already on
/// `base` survive unless a field of the same name replaces them.
pub fn backup_url(base: &Url, fields: &FormFields) -> Url {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(k, _)| !fields.contains(k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .extend_pairs(fields.iter());
    url
}

/// Phase 1: structured fields for the details endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsPayload {
    /// Target with the query-string backup applied.
    pub url: Url,
    pub fields: FormFields,
}

impl DetailsPayload {
    pub fn body(&self) -> String {
        self.fields.to_urlencoded()
    }
}

/// Phase 2: correlation fields plus every selected file.
#[derive(Debug, Clone, PartialEq)]
pub struct FilesPayload<H> {
    pub url: Url,
    pub fields: FormFields,
    /// `(multipart field name, file)` in input order.
    pub files: Vec<(String, Attachment<H>)>,
}

/// Builds the details payload from the draft. Only questions visible for
/// the current selection are sent; unanswered ones go out empty, as a
/// rendered form would send them.
pub fn details_payload(
    config: &FormConfig,
    target: &Url,
    draft: &LeadDraft,
    category: LoanCategory,
    meta: &SubmissionMeta,
) -> DetailsPayload {
    let multi_active = draft.multi_active();
    let mut fields = FormFields::new();

    for spec in catalog::visible_fields(Some(category), multi_active) {
        fields.set(spec.key, draft.field(spec.key));
    }

    let properties = encode_properties(
        config.properties_encoding,
        category,
        multi_active,
        draft.properties(),
    );

    fields.set("lead_id", meta.lead_id.as_str());
    fields.set("created_at", meta.created_at.as_str());
    fields.set("loan_type", category.code());
    fields.set("loan_type_label", category.label());
    fields.set("status", config.lead_status.as_str());
    fields.set("owner_email", config.owner_email.as_str());
    fields.set(HEARD_ABOUT, draft.field(HEARD_ABOUT));
    fields.set(HEARD_ABOUT_OTHER, draft.field(HEARD_ABOUT_OTHER));
    fields.set("has_multiple_properties", multi_active.to_string());
    fields.set("properties_count", draft.reported_property_count().to_string());
    fields.set("properties_json", properties);

    DetailsPayload {
        url: backup_url(target, &fields),
        fields,
    }
}

/// Builds the files payload. Inputs without a selection contribute no part.
pub fn files_payload<H>(
    target: &Url,
    category: LoanCategory,
    meta: &SubmissionMeta,
    documents: Vec<DocumentSelection<H>>,
) -> FilesPayload<H> {
    let mut fields = FormFields::new();
    fields.set("lead_id", meta.lead_id.as_str());
    fields.set("loan_type", category.code());
    fields.set("loan_type_label", category.label());
    fields.set("files_manifest", files_manifest(&documents));

    let files = documents
        .into_iter()
        .flat_map(|selection| {
            let name = selection.field_name;
            selection
                .files
                .into_iter()
                .map(move |file| (name.clone(), file))
        })
        .collect();

    FilesPayload {
        url: backup_url(target, &fields),
        fields,
        files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{decode_properties, PropertiesEncoding};
    use crate::model::PropertyField;

    fn meta() -> SubmissionMeta {
        SubmissionMeta {
            lead_id: "lead_1".to_string(),
            created_at: "2024-05-17T09:30:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_set_replaces() {
        let mut fields = FormFields::new();
        fields.set("a", "1");
        fields.set("b", "2");
        fields.set("a", "3");
        let pairs: Vec<_> = fields.iter().collect();
        assert_eq!(pairs, vec![("b", "2"), ("a", "3")]);
    }

    #[test]
    fn test_urlencoded_body() {
        let mut fields = FormFields::new();
        fields.set("full_name", "Ana María");
        fields.set("notes", "a&b=c");
        assert_eq!(fields.to_urlencoded(), "full_name=Ana+Mar%C3%ADa&notes=a%26b%3Dc");
    }

    #[test]
    fn test_backup_url_replaces_existing_params() {
        let base = Url::parse("https://hooks.example.com/catch/1/?lead_id=old&src=form").unwrap();
        let mut fields = FormFields::new();
        fields.set("lead_id", "lead_9");
        let url = backup_url(&base, &fields);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("src".to_string(), "form".to_string()),
                ("lead_id".to_string(), "lead_9".to_string())
            ]
        );
        assert_eq!(url.path(), "/catch/1/");
    }

    #[test]
    fn test_details_payload_fields() {
        let config = FormConfig::default();
        let target = config.details_url().unwrap();
        let mut draft = LeadDraft::new();
        draft.select_category(Some(LoanCategory::Equipment));
        draft.set_field("full_name", "Ana");
        draft.set_field("equip_type", "CNC lathe");
        draft.set_field(HEARD_ABOUT, "Facebook");
        draft.set_field("property_address", "not asked for equipment");

        let payload = details_payload(&config, &target, &draft, LoanCategory::Equipment, &meta());
        let fields = &payload.fields;
        assert_eq!(fields.get("full_name"), Some("Ana"));
        assert_eq!(fields.get("equip_type"), Some("CNC lathe"));
        assert_eq!(fields.get("email"), Some(""));
        assert_eq!(fields.get("property_address"), None);
        assert_eq!(fields.get("loan_type"), Some("EQUIP"));
        assert_eq!(fields.get("loan_type_label"), Some("Equipment"));
        assert_eq!(fields.get("status"), Some("awaiting_owner_approval"));
        assert_eq!(fields.get("heard_about"), Some("Facebook"));
        assert_eq!(fields.get("has_multiple_properties"), Some("false"));
        assert_eq!(fields.get("properties_count"), Some("0"));
        assert_eq!(fields.get("properties_json"), Some(""));

        let backup: Vec<(String, String)> = payload.url.query_pairs().into_owned().collect();
        assert_eq!(backup.len(), fields.len());
        assert!(backup.contains(&("equip_type".to_string(), "CNC lathe".to_string())));
    }

    #[test]
    fn test_details_payload_with_properties() {
        let config = FormConfig::default();
        let target = config.details_url().unwrap();
        let mut draft = LeadDraft::new();
        draft.select_category(Some(LoanCategory::Bridge));
        draft.set_multiple_properties(true);
        draft.update_property(0, PropertyField::BridgeArv, "750000");
        draft.set_field("bridge_arv", "top-level value hidden in multi mode");

        let payload = details_payload(&config, &target, &draft, LoanCategory::Bridge, &meta());
        assert_eq!(payload.fields.get("bridge_arv"), None);
        assert_eq!(payload.fields.get("has_multiple_properties"), Some("true"));
        assert_eq!(payload.fields.get("properties_count"), Some("2"));

        let decoded = decode_properties(
            PropertiesEncoding::LabeledText,
            payload.fields.get("properties_json").unwrap(),
        )
        .unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].get(PropertyField::BridgeArv), Some("750000"));
    }

    #[test]
    fn test_files_payload() {
        let target = FormConfig::default().files_url().unwrap();
        let documents = vec![
            DocumentSelection::new("doc_pfs", vec![Attachment::new("pfs.pdf", "application/pdf", 10, 1u8)]),
            DocumentSelection::new(
                "doc_bank_statements[]",
                vec![
                    Attachment::new("jan.pdf", "application/pdf", 10, 2u8),
                    Attachment::new("feb.pdf", "application/pdf", 10, 3u8),
                ],
            ),
        ];
        let payload = files_payload(&target, LoanCategory::Dscr, &meta(), documents);
        let parts: Vec<(&str, u8)> = payload
            .files
            .iter()
            .map(|(name, file)| (name.as_str(), file.handle))
            .collect();
        assert_eq!(
            parts,
            vec![("doc_pfs", 1), ("doc_bank_statements[]", 2), ("doc_bank_statements[]", 3)]
        );
        assert_eq!(payload.fields.get("lead_id"), Some("lead_1"));
        assert_eq!(payload.fields.get("loan_type"), Some("DSCR"));
        assert_eq!(
            payload.fields.get("files_manifest"),
            Some("doc_pfs: pfs.pdf | doc_bank_statements[]: jan.pdf, feb.pdf")
        );
        assert!(payload.url.query().unwrap().contains("lead_id=lead_1"));
    }
}
