//! Client configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{GvpError, Result};

/// Root client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Website endpoints
    #[serde(default)]
    pub site: SiteConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(GvpError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(GvpError::validation("http.timeout_secs must be > 0"));
        }
        self.site.api_url()?;
        self.site.events_url()?;
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Base URLs of the JSON API and the event pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base of the JSON API, endpoints are joined onto it
    #[serde(default = "defaults::api_url")]
    pub api_url: String,

    /// Directory holding the event listing and detail pages
    #[serde(default = "defaults::events_url")]
    pub events_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::api_url(),
            events_url: defaults::events_url(),
        }
    }
}

impl SiteConfig {
    /// Parsed JSON API base.
    pub fn api_url(&self) -> Result<Url> {
        Self::base_url("site.api_url", &self.api_url)
    }

    /// Parsed event pages base.
    pub fn events_url(&self) -> Result<Url> {
        Self::base_url("site.events_url", &self.events_url)
    }

    // Without the trailing slash `Url::join` would replace the last segment.
    fn base_url(key: &str, raw: &str) -> Result<Url> {
        if !raw.ends_with('/') {
            return Err(GvpError::validation(format!("{key} must end with '/'")));
        }
        Url::parse(raw).map_err(|e| GvpError::validation(format!("{key} is not a URL: {e}")))
    }
}

mod defaults {
    pub fn user_agent() -> String {
        concat!("gvp-rs/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn api_url() -> String {
        "https://www.gvp.cz/new/api/".into()
    }
    pub fn events_url() -> String {
        "https://www.gvp.cz/prehled_akci/".into()
    }
}
