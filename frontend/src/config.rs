//! Page-provided form configuration.
//!
//! The hosting page may embed
//! `<script id="lead-form-config" type="application/json">{ ... }</script>`
//! to override endpoints or the properties encoding. Missing or invalid
//! blocks fall back to the built-in defaults.

use common::config::FormConfig;
use gloo_console::{log, warn};

const CONFIG_ELEMENT_ID: &str = "lead-form-config";

pub fn load_form_config() -> FormConfig {
    let source = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|e| e.text_content());

    let Some(source) = source.filter(|s| !s.trim().is_empty()) else {
        return FormConfig::default();
    };

    match FormConfig::from_json(&source) {
        Ok(config) => {
            log!(format!(
                "form config loaded: details -> {}, files -> {}",
                config.details_endpoint, config.files_endpoint
            ));
            config
        }
        Err(err) => {
            warn!(format!("ignoring #{CONFIG_ELEMENT_ID}: {err}"));
            FormConfig::default()
        }
    }
}
