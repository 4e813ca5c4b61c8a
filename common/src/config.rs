//! Form configuration: where the two phases go and how they are shaped.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::encoding::PropertiesEncoding;
use crate::error::ConfigError;

pub const DEFAULT_DETAILS_ENDPOINT: &str = "https://hooks.zapier.com/hooks/catch/25247950/uf3fs1c/";
pub const DEFAULT_FILES_ENDPOINT: &str = "https://hooks.zapier.com/hooks/catch/25247950/ufucr11/";
pub const DEFAULT_OWNER_EMAIL: &str = "jashton@ashtonaisolutions.com";
pub const DEFAULT_LEAD_STATUS: &str = "awaiting_owner_approval";
pub const DEFAULT_FALLBACK_DELAY_MS: u64 = 1200;

/// Runtime settings of the form. Every key is optional in the JSON source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Endpoint A, receives the url-encoded details.
    pub details_endpoint: String,
    /// Endpoint B, receives the multipart files.
    pub files_endpoint: String,
    pub owner_email: String,
    pub lead_status: String,
    /// How long phase 2 waits for phase 1's completion signal.
    pub fallback_delay_ms: u64,
    pub properties_encoding: PropertiesEncoding,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            details_endpoint: DEFAULT_DETAILS_ENDPOINT.to_string(),
            files_endpoint: DEFAULT_FILES_ENDPOINT.to_string(),
            owner_email: DEFAULT_OWNER_EMAIL.to_string(),
            lead_status: DEFAULT_LEAD_STATUS.to_string(),
            fallback_delay_ms: DEFAULT_FALLBACK_DELAY_MS,
            properties_encoding: PropertiesEncoding::default(),
        }
    }
}

impl FormConfig {
    /// Parses and validates a JSON configuration block.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: FormConfig = serde_json::from_str(source)?;
        config.details_url()?;
        config.files_url()?;
        Ok(config)
    }

    pub fn details_url(&self) -> Result<Url, ConfigError> {
        parse_endpoint("details_endpoint", &self.details_endpoint)
    }

    pub fn files_url(&self) -> Result<Url, ConfigError> {
        parse_endpoint("files_endpoint", &self.files_endpoint)
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }
}

fn parse_endpoint(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::Url { name, source })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Scheme {
            name,
            scheme: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert_eq!(config.fallback_delay(), Duration::from_millis(1200));
        assert_eq!(config.properties_encoding, PropertiesEncoding::LabeledText);
        assert!(config.details_url().is_ok());
        assert!(config.files_url().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FormConfig::from_json(
            r#"{ "details_endpoint": "http://127.0.0.1:8080/hooks/details", "properties_encoding": "json" }"#,
        )
        .unwrap();
        assert_eq!(config.details_endpoint, "http://127.0.0.1:8080/hooks/details");
        assert_eq!(config.files_endpoint, DEFAULT_FILES_ENDPOINT);
        assert_eq!(config.properties_encoding, PropertiesEncoding::Json);
        assert_eq!(config.fallback_delay_ms, 1200);
    }

    #[test]
    fn test_invalid_endpoints_rejected() {
        assert!(matches!(
            FormConfig::from_json(r#"{ "files_endpoint": "not a url" }"#),
            Err(ConfigError::Url { name: "files_endpoint", .. })
        ));
        assert!(matches!(
            FormConfig::from_json(r#"{ "details_endpoint": "ftp://example.com/" }"#),
            Err(ConfigError::Scheme { .. })
        ));
        assert!(matches!(FormConfig::from_json("{"), Err(ConfigError::Json(_))));
    }
}
