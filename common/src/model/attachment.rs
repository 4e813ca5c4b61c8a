//! File attachments as seen by the admission policy and the files phase.

/// A selected file. `handle` is whatever the host environment uses to refer
/// to the file (a browser `File` in the frontend, `()` in tests); its bytes
/// are never read here.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment<H> {
    pub name: String,
    pub content_type: String,
    pub size: u64,
    pub handle: H,
}

impl<H> Attachment<H> {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, size: u64, handle: H) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size,
            handle,
        }
    }
}

/// The files currently picked in one document input.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSelection<H> {
    /// Multipart field name, e.g. `doc_pfs` or `doc_bank_statements[]`.
    pub field_name: String,
    pub files: Vec<Attachment<H>>,
}

impl<H> DocumentSelection<H> {
    pub fn new(field_name: impl Into<String>, files: Vec<Attachment<H>>) -> Self {
        Self {
            field_name: field_name.into(),
            files,
        }
    }
}

/// One-line summary of the selected files, `field: a, b | field: c`.
/// Inputs without a selection are skipped.
pub fn files_manifest<H>(selections: &[DocumentSelection<H>]) -> String {
    selections
        .iter()
        .filter(|s| !s.files.is_empty())
        .map(|s| {
            let names: Vec<&str> = s.files.iter().map(|f| f.name.as_str()).collect();
            format!("{}: {}", s.field_name, names.join(", "))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
