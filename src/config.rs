//! Configuration for asset-inventory.
//!
//! Credentials come from the environment; tuning knobs (cache directory,
//! entry max age, endpoints excluded from caching) come from an optional
//! `asset-inventory.config.yml` discovered in the working directory.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::shared::{InventoryError, Result};

const CONFIG_FILENAME: &str = "asset-inventory.config.yml";

const SUBDOMAIN_VAR: &str = "SERVICEDESK_SUBDOMAIN";
const API_KEY_VAR: &str = "SERVICEDESK_API_KEY";
const BASE_URL_VAR: &str = "SERVICEDESK_BASE_URL";

/// Default cache entry lifetime in hours.
pub const DEFAULT_MAX_AGE_HOURS: u64 = 24;

/// Upper bound on the configured lifetime (one year).
pub const MAX_MAX_AGE_HOURS: u64 = 24 * 365;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub cache_dir: Option<PathBuf>,
    pub max_age_hours: Option<u64>,
    pub excluded_endpoints: Option<Vec<String>>,
    pub cache_enabled: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub root: PathBuf,
    pub max_age: Duration,
    /// Endpoint types (first path segments) that must always hit the
    /// network. The asset list itself churns too fast to cache.
    pub excluded_endpoints: Vec<String>,
    pub enabled: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from(".cache"),
            max_age: Duration::from_secs(DEFAULT_MAX_AGE_HOURS * 3600),
            excluded_endpoints: vec!["assets".to_string()],
            enabled: true,
        }
    }
}

impl CacheSettings {
    /// Merges the config file over the defaults.
    pub fn from_file(file: &ConfigFile) -> Self {
        let defaults = CacheSettings::default();
        CacheSettings {
            root: file.cache_dir.clone().unwrap_or(defaults.root),
            max_age: Duration::from_secs(
                file.max_age_hours
                    .unwrap_or(DEFAULT_MAX_AGE_HOURS)
                    .saturating_mul(3600),
            ),
            excluded_endpoints: file
                .excluded_endpoints
                .clone()
                .unwrap_or(defaults.excluded_endpoints),
            enabled: file.cache_enabled.unwrap_or(true),
        }
    }
}

/// Credentials for the remote API, taken from the environment.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub base_url: String,
    pub api_key: String,
}

impl ApiCredentials {
    /// Reads credentials from the environment. The base URL is either
    /// explicit or derived from the service-desk subdomain.
    ///
    /// # Errors
    /// Missing credentials are fatal at startup.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| InventoryError::MissingCredentials {
            var: API_KEY_VAR.to_string(),
        })?;

        let base_url = match std::env::var(BASE_URL_VAR) {
            Ok(url) => url,
            Err(_) => {
                let subdomain =
                    std::env::var(SUBDOMAIN_VAR).map_err(|_| InventoryError::MissingCredentials {
                        var: SUBDOMAIN_VAR.to_string(),
                    })?;
                format!("https://{subdomain}.freshservice.com/api/v2")
            }
        };

        Ok(Self { base_url, api_key })
    }
}

/// Loads the config file: an explicit path must exist; otherwise discovery
/// in the working directory falls back to defaults.
pub fn load_or_discover(explicit_config: Option<&Path>) -> Result<ConfigFile> {
    match explicit_config {
        Some(path) => load_config_from_path(path),
        None => Ok(discover_config(Path::new("."))?.unwrap_or_default()),
    }
}

/// Load config from an explicit path. Returns an error if the file is not
/// found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not
/// found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.max_age_hours == Some(0) {
        anyhow::bail!(
            "Invalid config: max_age_hours must be greater than zero.\n\n\
             💡 Hint: Use cache_enabled: false to bypass caching instead."
        );
    }
    if let Some(hours) = config.max_age_hours {
        if hours > MAX_MAX_AGE_HOURS {
            anyhow::bail!(
                "Invalid config: max_age_hours must be at most {MAX_MAX_AGE_HOURS} (one year), got {hours}."
            );
        }
    }
    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
cache_dir: /tmp/asset-cache
max_age_hours: 12
excluded_endpoints:
  - assets
  - requesters
cache_enabled: true
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/asset-cache")));
        assert_eq!(config.max_age_hours, Some(12));
        assert_eq!(
            config.excluded_endpoints.as_deref(),
            Some(&["assets".to_string(), "requesters".to_string()][..])
        );
        assert_eq!(config.cache_enabled, Some(true));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_captured() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "max_age_hours: 6\nttl_hours: 6\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.unknown_fields.contains_key("ttl_hours"));
    }

    #[test]
    fn test_zero_max_age_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "max_age_hours: 0\n").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("max_age_hours"));
    }

    #[test]
    fn test_oversized_max_age_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "max_age_hours: 9999999999999999999\n").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_max_age_seconds_never_overflow() {
        let file = ConfigFile {
            max_age_hours: Some(u64::MAX),
            ..Default::default()
        };
        let settings = CacheSettings::from_file(&file);
        assert_eq!(settings.max_age, Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_cache_settings_merge_over_defaults() {
        let file = ConfigFile {
            max_age_hours: Some(6),
            ..Default::default()
        };
        let settings = CacheSettings::from_file(&file);
        assert_eq!(settings.max_age, Duration::from_secs(6 * 3600));
        assert_eq!(settings.root, PathBuf::from(".cache"));
        assert_eq!(settings.excluded_endpoints, vec!["assets".to_string()]);
        assert!(settings.enabled);
    }

    #[test]
    fn test_discover_missing_config_is_silent() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_missing_config_path_is_an_error() {
        let result = load_config_from_path(Path::new("/definitely/not/here.yml"));
        assert!(result.is_err());
    }
}
