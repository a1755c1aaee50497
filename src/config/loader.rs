//! Configuration file loading with precedence handling.

use crate::catalog::giphy::DEFAULT_BASE_URL;
use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::persistence::{default_storage_path, DEFAULT_LAST_SEARCH_KEY};
use crate::state::{BrowserSettings, DEFAULT_COPY_FEEDBACK, DEFAULT_DEBOUNCE, DEFAULT_ERROR_FLASH};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "GIFGRID_CONFIG";
/// Environment variable carrying the API key.
pub const API_KEY_ENV: &str = "GIFGRID_API_KEY";
/// Environment variable overriding the API base URL.
pub const API_BASE_URL_ENV: &str = "GIFGRID_API_BASE_URL";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a regular file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// No API key in the config file, environment or command line.
    #[error("No API key configured: set api_key in the config file, {API_KEY_ENV}, or pass --api-key")]
    MissingApiKey,

    /// A setting is present but unusable.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Config field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/gifgrid/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// GIPHY API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API root, e.g. `https://api.giphy.com/v1`.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Items requested per fetch.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Query settle delay in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// How long the "Copied!" badge stays, in milliseconds.
    #[serde(default)]
    pub copy_feedback_ms: Option<u64>,

    /// How long a copy failure message stays, in milliseconds.
    #[serde(default)]
    pub error_flash_ms: Option<u64>,

    /// HTTP request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Key the last search is stored under.
    #[serde(default)]
    pub storage_key: Option<String>,

    /// Shared store file.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// `None` until some layer provides one; rejected by `validate`.
    pub api_key: Option<String>,
    /// Catalog API root, without trailing slash.
    pub api_base_url: String,
    /// Items per request.
    pub page_size: usize,
    /// Quiet period before typed input settles.
    pub debounce: Duration,
    /// How long the copied badge stays.
    pub copy_feedback: Duration,
    /// How long a copy failure message stays.
    pub error_flash: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Key the last search is stored under.
    pub storage_key: String,
    /// Shared store file.
    pub storage_path: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            copy_feedback: DEFAULT_COPY_FEEDBACK,
            error_flash: DEFAULT_ERROR_FLASH,
            request_timeout: Duration::from_secs(10),
            storage_key: DEFAULT_LAST_SEARCH_KEY.to_string(),
            storage_path: default_storage_path(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Check that the configuration can start the app.
    ///
    /// # Errors
    ///
    /// `MissingApiKey` if no non-blank key was provided, `InvalidValue` for a
    /// zero page size or a blank storage key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            return Err(ConfigError::MissingApiKey);
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage_key",
                reason: "must not be blank".to_string(),
            });
        }
        Ok(())
    }

    /// Timings and page size for the browser.
    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            page_size: self.page_size,
            debounce: self.debounce,
            copy_feedback: self.copy_feedback,
            error_flash: self.error_flash,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/gifgrid/gifgrid.log` on Linux, or the platform
/// equivalent. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("gifgrid").join("gifgrid.log")
    } else {
        PathBuf::from("gifgrid.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/gifgrid/config.toml` on Linux, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gifgrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `GIFGRID_CONFIG` environment variable
/// 3. Default path `~/.config/gifgrid/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `GIFGRID_API_KEY`: Override API key
/// - `GIFGRID_API_BASE_URL`: Override API root
///
/// Empty values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(key) = non_empty_env(API_KEY_ENV) {
        config.api_key = Some(key);
    }

    if let Some(url) = non_empty_env(API_BASE_URL_ENV) {
        config.api_base_url = url;
    }

    config
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        api_key: config.api_key.or(defaults.api_key),
        api_base_url: config.api_base_url.unwrap_or(defaults.api_base_url),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        debounce: config
            .debounce_ms
            .map_or(defaults.debounce, Duration::from_millis),
        copy_feedback: config
            .copy_feedback_ms
            .map_or(defaults.copy_feedback, Duration::from_millis),
        error_flash: config
            .error_flash_ms
            .map_or(defaults.error_flash, Duration::from_millis),
        request_timeout: config
            .request_timeout_secs
            .map_or(defaults.request_timeout, Duration::from_secs),
        storage_key: config.storage_key.unwrap_or(defaults.storage_key),
        storage_path: config.storage_path.unwrap_or(defaults.storage_path),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    api_key_override: Option<String>,
    page_size_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(key) = api_key_override {
        config.api_key = Some(key);
    }

    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
