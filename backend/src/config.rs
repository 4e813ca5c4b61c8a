//! Server settings read from the environment.
//!
//! | variable                  | default     |
//! |---------------------------|-------------|
//! | `LEAD_FORM_HOST`          | `127.0.0.1` |
//! | `LEAD_FORM_PORT`          | `8080`      |
//! | `LEAD_FORM_OPEN_BROWSER`  | `true`      |

use log::warn;

pub const HOST_VAR: &str = "LEAD_FORM_HOST";
pub const PORT_VAR: &str = "LEAD_FORM_PORT";
pub const OPEN_BROWSER_VAR: &str = "LEAD_FORM_OPEN_BROWSER";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            open_browser: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Unparseable values are
    /// logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup(HOST_VAR).filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup(PORT_VAR) {
            match port.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(e) => warn!("{PORT_VAR}='{port}' is not a port ({e}), using {DEFAULT_PORT}"),
            }
        }

        if let Some(flag) = lookup(OPEN_BROWSER_VAR) {
            match parse_flag(&flag) {
                Some(open) => config.open_browser = open,
                None => warn!("{OPEN_BROWSER_VAR}='{flag}' is not a boolean, ignoring"),
            }
        }

        config
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
