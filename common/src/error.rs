//! Error types shared across the lead-intake crates.

use thiserror::Error;

use crate::admission::{ALLOWED_EXTENSIONS, MAX_FILE_LABEL, MAX_TOTAL_LABEL};

/// Reason an attachment set was refused by the admission policy.
///
/// The `Display` output is shown verbatim on the form's status line, so each
/// variant names the offending file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error(
        "Unsupported file type: {file}. Allowed: {allowed} and common images.",
        allowed = ALLOWED_EXTENSIONS.join(", ")
    )]
    UnsupportedType { file: String },

    #[error("File too large: {file}. Please keep each file ≤ {limit}.", limit = MAX_FILE_LABEL)]
    FileTooLarge { file: String, size: u64 },

    #[error(
        "Total upload size too large once {file} is added. Please keep all files combined ≤ {limit}.",
        limit = MAX_TOTAL_LABEL
    )]
    TotalTooLarge { file: String, total: u64 },
}

/// Why a submit attempt did not leave the idle state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please select a loan type before submitting.")]
    MissingCategory,

    #[error(transparent)]
    Attachments(#[from] AdmissionError),
}

/// Failure to turn a `properties_json` value back into property records.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("properties payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("properties payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("properties payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown property field '{0}'")]
    UnknownField(String),

    #[error("malformed report line {line}: '{content}'")]
    MalformedReport { line: usize, content: String },
}

/// Invalid form configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid endpoint URL for {name}: {source}")]
    Url {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("Endpoint {name} must use http or https, got '{scheme}'")]
    Scheme { name: &'static str, scheme: String },
}
