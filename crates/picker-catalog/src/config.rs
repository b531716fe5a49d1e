//! Catalog client configuration.
//!
//! The endpoint and credentials are supplied from a config file and/or the
//! environment; nothing is compiled in.

use anyhow::{bail, Context, Result};
use picker_core::money::Currency;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding [`CatalogConfig::endpoint`].
pub const ENV_ENDPOINT: &str = "PICKER_CATALOG_ENDPOINT";
/// Environment variable overriding [`CatalogConfig::api_key`].
pub const ENV_API_KEY: &str = "PICKER_CATALOG_API_KEY";
/// Environment variable overriding [`CatalogConfig::page_size`].
pub const ENV_PAGE_SIZE: &str = "PICKER_CATALOG_PAGE_SIZE";

/// Settings for reaching the catalog search service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Full URL of the search endpoint.
    pub endpoint: String,

    /// API key sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Header carrying the API key.
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Products per page requested by the picker.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Currency prices are reported in.
    #[serde(default)]
    pub currency: Currency,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_key_header() -> String {
    "x-api-key".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    10
}

impl CatalogConfig {
    /// Create a config for an endpoint with default settings.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            api_key_header: default_api_key_header(),
            page_size: default_page_size(),
            currency: Currency::default(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Load config from a TOML file, or JSON when the path ends in `.json`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog config: {}", path))?;
        let config = Self::parse(&content, path.ends_with(".json"))
            .with_context(|| format!("Failed to parse catalog config: {}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config purely from environment variables.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var(ENV_ENDPOINT)
            .with_context(|| format!("{} is not set", ENV_ENDPOINT))?;
        let config = Self::new(endpoint).with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply any `PICKER_CATALOG_*` environment overrides.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            self.page_size = size
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer", ENV_PAGE_SIZE))?;
        }
        Ok(self)
    }

    fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            bail!("catalog endpoint must not be empty");
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            bail!("catalog endpoint must be an http(s) URL: {}", self.endpoint);
        }
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.api_key_header.trim().is_empty() {
            bail!("api_key_header must not be empty");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Generate a commented example config file.
pub fn generate_default_config(endpoint: &str) -> String {
    format!(
        r#"# Product picker catalog configuration

endpoint = "{endpoint}"
# api_key = "set PICKER_CATALOG_API_KEY instead of committing a key"
api_key_header = "x-api-key"
page_size = 10
currency = "USD"
timeout_secs = 10
"#,
        endpoint = endpoint
    )
}
