//! Client-side gate on attachments.
//!
//! The files webhook drops oversized requests without telling anyone, so
//! every submit attempt checks type and size here before anything is sent.
//! Ceilings sit below the receiver's practical limit to leave room for
//! multipart overhead.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::error::AdmissionError;
use crate::model::DocumentSelection;

/// 9.5 MiB.
pub const MAX_FILE_BYTES: u64 = 19 * 512 * 1024;
/// 30 MiB.
pub const MAX_TOTAL_BYTES: u64 = 30 * 1024 * 1024;

pub(crate) const MAX_FILE_LABEL: &str = "9.5 MB";
pub(crate) const MAX_TOTAL_LABEL: &str = "30 MB";

pub const ALLOWED_EXTENSIONS: [&str; 15] = [
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".csv", ".txt", ".rtf", ".zip", ".tif", ".tiff",
    ".jpg", ".jpeg", ".png", ".heic",
];

pub const ALLOWED_MIME_TYPES: [&str; 13] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/csv",
    "text/plain",
    "application/rtf",
    "application/zip",
    "image/tiff",
    "image/jpeg",
    "image/png",
    "image/heic",
];

const OCTET_STREAM: &str = "application/octet-stream";

static IMAGE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^image/").expect("static image pattern compiles"));

/// Totals of an accepted attachment set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdmittedFiles {
    pub count: usize,
    pub total_bytes: u64,
}

/// Value for the file pickers' `accept` attribute.
pub fn accept_attribute() -> String {
    format!("{},image/*", ALLOWED_EXTENSIONS.join(","))
}

pub fn has_allowed_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Type check for one file. Scanners and some OSes report
/// `application/octet-stream` or nothing at all, in which case the
/// extension decides.
pub fn is_allowed_file(name: &str, content_type: &str) -> bool {
    if ALLOWED_MIME_TYPES.contains(&content_type) {
        return true;
    }
    if IMAGE_TYPE.is_match(content_type) {
        return true;
    }
    if content_type == OCTET_STREAM && has_allowed_extension(name) {
        return true;
    }
    has_allowed_extension(name)
}

/// Checks every selected file, in input order then selection order, and
/// reports the first violation only.
pub fn admit<H>(selections: &[DocumentSelection<H>]) -> Result<AdmittedFiles, AdmissionError> {
    let mut admitted = AdmittedFiles::default();
    for file in selections.iter().flat_map(|s| s.files.iter()) {
        if !is_allowed_file(&file.name, &file.content_type) {
            debug!("rejecting {} ({}): type", file.name, file.content_type);
            return Err(AdmissionError::UnsupportedType {
                file: file.name.clone(),
            });
        }
        if file.size > MAX_FILE_BYTES {
            debug!("rejecting {} ({} bytes): size", file.name, file.size);
            return Err(AdmissionError::FileTooLarge {
                file: file.name.clone(),
                size: file.size,
            });
        }
        admitted.total_bytes += file.size;
        admitted.count += 1;
        if admitted.total_bytes > MAX_TOTAL_BYTES {
            debug!("rejecting at {}: total {} bytes", file.name, admitted.total_bytes);
            return Err(AdmissionError::TotalTooLarge {
                file: file.name.clone(),
                total: admitted.total_bytes,
            });
        }
    }
    Ok(admitted)
}
