//! Pagination configuration
//!
//! Holds the tunables shared by the timed caller, the retrying fetcher and
//! the cursor stream. Built in code through [`PaginationConfig::builder`] or
//! loaded from a YAML/JSON file whose durations are given in milliseconds:
//!
//! ```yaml
//! max_retries: 4
//! retry_delay_ms: 1000
//! request_timeout_ms: 1000
//! page_delay_ms: 200
//! cursor_param: tid
//! id_field: tid
//! ```

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default number of attempts per page, including the first
pub const DEFAULT_MAX_RETRIES: u32 = 4;
/// Default delay between attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);
/// Default per-request deadline
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(1000);
/// Default delay between delivered pages
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(200);
/// Default query parameter carrying the cursor
pub const DEFAULT_CURSOR_PARAM: &str = "tid";
/// Default record field read as the trailing id
pub const DEFAULT_ID_FIELD: &str = "tid";

/// Immutable configuration for one pagination session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Total attempts per page, including the first
    pub max_retries: u32,
    /// Constant delay between attempts
    pub retry_delay: Duration,
    /// Hard deadline for a single request
    pub request_timeout: Duration,
    /// Delay between successfully delivered pages
    pub page_delay: Duration,
    /// Query parameter the cursor is sent in
    pub cursor_param: String,
    /// Record field read as the trailing id of a page
    pub id_field: String,
    /// Treat a numeric trailing id of zero as "no more data"
    pub zero_is_sentinel: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            page_delay: DEFAULT_PAGE_DELAY,
            cursor_param: DEFAULT_CURSOR_PARAM.to_string(),
            id_field: DEFAULT_ID_FIELD.to_string(),
            zero_is_sentinel: true,
        }
    }
}

impl PaginationConfig {
    /// Create a new config builder
    pub fn builder() -> PaginationConfigBuilder {
        PaginationConfigBuilder::default()
    }

    /// Check the invariants the core components rely on
    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(Error::config("max_retries must be at least 1"));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::config("request_timeout must be greater than zero"));
        }
        if self.cursor_param.trim().is_empty() {
            return Err(Error::config("cursor_param must not be empty"));
        }
        if self.id_field.trim().is_empty() {
            return Err(Error::config("id_field must not be empty"));
        }
        Ok(())
    }

    /// Parse a config from YAML (or JSON) text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        let config = Self::from(file);
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML or JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_yaml_str(&content)
    }
}

/// Builder for [`PaginationConfig`]
#[derive(Debug, Default)]
pub struct PaginationConfigBuilder {
    config: PaginationConfig,
}

impl PaginationConfigBuilder {
    /// Set total attempts per page
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the delay between attempts
    #[must_use]
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Set the per-request deadline
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the delay between delivered pages
    #[must_use]
    pub fn page_delay(mut self, delay: Duration) -> Self {
        self.config.page_delay = delay;
        self
    }

    /// Set the query parameter name
    #[must_use]
    pub fn cursor_param(mut self, param: impl Into<String>) -> Self {
        self.config.cursor_param = param.into();
        self
    }

    /// Set the record field read as the trailing id
    #[must_use]
    pub fn id_field(mut self, field: impl Into<String>) -> Self {
        self.config.id_field = field.into();
        self
    }

    /// Whether a zero trailing id ends pagination
    #[must_use]
    pub fn zero_is_sentinel(mut self, enabled: bool) -> Self {
        self.config.zero_is_sentinel = enabled;
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<PaginationConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// On-disk shape of the config, durations in milliseconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Total attempts per page
    #[serde(default)]
    pub max_retries: Option<u32>,
    /// Delay between attempts in milliseconds
    #[serde(default)]
    pub retry_delay_ms: Option<u64>,
    /// Request deadline in milliseconds
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    /// Delay between pages in milliseconds
    #[serde(default)]
    pub page_delay_ms: Option<u64>,
    /// Query parameter carrying the cursor
    #[serde(default)]
    pub cursor_param: Option<String>,
    /// Record field read as the trailing id
    #[serde(default)]
    pub id_field: Option<String>,
    /// Whether a zero trailing id ends pagination
    #[serde(default)]
    pub zero_is_sentinel: Option<bool>,
}

impl From<ConfigFile> for PaginationConfig {
    fn from(file: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            max_retries: file.max_retries.unwrap_or(defaults.max_retries),
            retry_delay: file
                .retry_delay_ms
                .map_or(defaults.retry_delay, Duration::from_millis),
            request_timeout: file
                .request_timeout_ms
                .map_or(defaults.request_timeout, Duration::from_millis),
            page_delay: file
                .page_delay_ms
                .map_or(defaults.page_delay, Duration::from_millis),
            cursor_param: file.cursor_param.unwrap_or(defaults.cursor_param),
            id_field: file.id_field.unwrap_or(defaults.id_field),
            zero_is_sentinel: file.zero_is_sentinel.unwrap_or(defaults.zero_is_sentinel),
        }
    }
}
