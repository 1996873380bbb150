//! Loading of the client configuration from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use carfinder_core::config::{API_BASE_ENV, ClientConfig, ConfigFile};
use carfinder_core::error::Result;

use crate::paths::CarfinderPaths;

/// Reads `config.toml` and merges it with the environment and command line.
pub struct ConfigService {
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Uses the platform config file location, if one can be determined.
    pub fn new() -> Self {
        let path = match CarfinderPaths::config_file() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!("No config file location: {}", e);
                None
            }
        };
        Self { path }
    }

    /// Uses an explicit config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads the config file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ConfigFile))`: file exists and parsed
    /// - `Ok(None)`: no path, file missing, or file empty
    /// - `Err(_)`: file could not be read or is not valid TOML
    pub fn load_file(&self) -> Result<Option<ConfigFile>> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let file: ConfigFile = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(Some(file))
    }

    /// Resolves the effective configuration.
    ///
    /// `env_api_base` is the value of `CARFINDER_API_BASE`, passed in so the
    /// caller decides how the environment is read.
    pub fn resolve(
        &self,
        cli_api_base: Option<String>,
        env_api_base: Option<String>,
    ) -> Result<ClientConfig> {
        let file = self.load_file()?;
        let config = ClientConfig::resolve(cli_api_base, env_api_base, file);
        tracing::info!(api_base = %config.api_base, "Resolved client configuration");
        Ok(config)
    }

    /// Resolves the configuration reading `CARFINDER_API_BASE` from the process environment.
    pub fn resolve_from_env(&self, cli_api_base: Option<String>) -> Result<ClientConfig> {
        self.resolve(cli_api_base, std::env::var(API_BASE_ENV).ok())
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        assert!(service.load_file().unwrap().is_none());
        let config = service.resolve(None, None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_file_values_are_used() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "api_base = \"http://catalog.local:9000/\"\nrequest_timeout_secs = 15\n",
        )
        .unwrap();

        let config = ConfigService::with_path(&path).resolve(None, None).unwrap();
        assert_eq!(config.api_base, "http://catalog.local:9000");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_env_and_flag_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "api_base = \"http://file\"\n").unwrap();
        let service = ConfigService::with_path(&path);

        let config = service.resolve(None, Some("http://env".into())).unwrap();
        assert_eq!(config.api_base, "http://env");

        let config = service
            .resolve(Some("http://flag".into()), Some("http://env".into()))
            .unwrap();
        assert_eq!(config.api_base, "http://flag");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "api_base = [unterminated").unwrap();

        let err = ConfigService::with_path(&path).load_file().unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_empty_file_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "\n  \n").unwrap();

        assert!(ConfigService::with_path(&path).load_file().unwrap().is_none());
    }
}
