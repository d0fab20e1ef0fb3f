//! Integration configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables. The resulting value is handed to the adapters
//! explicitly; nothing downstream reads the environment on its own.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IntegrationError, IntegrationResult};

pub const ENV_JIRA_BASE: &str = "JIRA_BASE";
pub const ENV_JIRA_USER: &str = "JIRA_USER";
pub const ENV_JIRA_TOKEN: &str = "JIRA_TOKEN";
pub const ENV_QMETRY_BASE: &str = "QMETRY_BASE";
pub const ENV_QMETRY_API_KEY: &str = "QMETRY_API_KEY";
pub const ENV_HTTP_HOST: &str = "STLC_HOST";
pub const ENV_HTTP_PORT: &str = "PORT";
pub const ENV_HTTP_TIMEOUT: &str = "STLC_HTTP_TIMEOUT_SECS";

/// Jira connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JiraConfig {
    pub base_url: Option<String>,
    pub user: Option<String>,
    pub token: Option<String>,
}

impl JiraConfig {
    /// Live lookups need all three values.
    pub fn is_configured(&self) -> bool {
        is_set(&self.base_url) && is_set(&self.user) && is_set(&self.token)
    }
}

/// QMetry connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QmetryConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl QmetryConfig {
    /// Payloads target a live instance only when both values are present.
    pub fn is_enabled(&self) -> bool {
        is_set(&self.base_url) && is_set(&self.api_key)
    }
}

/// HTTP server and client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: 10,
        }
    }
}

/// Complete configuration for the adapters and the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IntegrationConfig {
    pub jira: JiraConfig,
    pub qmetry: QmetryConfig,
    pub http: HttpConfig,
}

impl IntegrationConfig {
    /// Load defaults, the optional file, and the process environment.
    pub fn load(path: Option<&Path>) -> IntegrationResult<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Read a TOML configuration file.
    pub fn from_file(path: &Path) -> IntegrationResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|e| IntegrationError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> IntegrationResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_JIRA_BASE) {
            self.jira.base_url = Some(v.trim_end_matches('/').to_string());
        }
        if let Some(v) = get(ENV_JIRA_USER) {
            self.jira.user = Some(v);
        }
        if let Some(v) = get(ENV_JIRA_TOKEN) {
            self.jira.token = Some(v);
        }
        if let Some(v) = get(ENV_QMETRY_BASE) {
            self.qmetry.base_url = Some(v);
        }
        if let Some(v) = get(ENV_QMETRY_API_KEY) {
            self.qmetry.api_key = Some(v);
        }
        if let Some(v) = get(ENV_HTTP_HOST) {
            self.http.host = v;
        }
        if let Some(v) = get(ENV_HTTP_PORT) {
            self.http.port = v
                .trim()
                .parse()
                .map_err(|_| IntegrationError::invalid_setting(ENV_HTTP_PORT, format!("not a port: {}", v)))?;
        }
        if let Some(v) = get(ENV_HTTP_TIMEOUT) {
            self.http.request_timeout_secs = v.trim().parse().map_err(|_| {
                IntegrationError::invalid_setting(ENV_HTTP_TIMEOUT, format!("not a number of seconds: {}", v))
            })?;
        }

        Ok(self)
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
