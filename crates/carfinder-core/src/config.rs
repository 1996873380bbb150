//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog service address used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Environment variable overriding the configured catalog address.
pub const API_BASE_ENV: &str = "CARFINDER_API_BASE";

/// Runtime configuration for the catalog and assistant clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address of the catalog service, without a trailing slash
    pub api_base: String,
    /// Per-request timeout; `None` lets a request run until it settles
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: normalize_base(&api_base.into()),
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Merges the configuration layers, highest precedence first:
    /// command line flag, environment variable, config file, built-in default.
    pub fn resolve(
        cli_api_base: Option<String>,
        env_api_base: Option<String>,
        file: Option<ConfigFile>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let api_base = [cli_api_base, env_api_base, file.api_base]
            .into_iter()
            .flatten()
            .find(|base| !base.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let config = Self::new(api_base);
        match file.request_timeout_secs {
            Some(secs) => config.with_request_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    /// Absolute URL of an endpoint path such as `"/cars"`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

/// On-disk configuration (`config.toml`); every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
