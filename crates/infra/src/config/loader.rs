//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If `STOREFRONT_API_BASE_URL` is set, loads from environment variables
//!    (an invalid value there is an error, not a reason to try files)
//! 2. Otherwise loads from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `STOREFRONT_API_BASE_URL`: Backend origin plus API prefix (required)
//! - `STOREFRONT_API_TIMEOUT_MS`: Per-request timeout in milliseconds
//! - `STOREFRONT_API_REFRESH_PATH`: Token renewal endpoint path
//! - `STOREFRONT_CSRF_HEADER`: Anti-forgery header name
//! - `STOREFRONT_CSRF_COOKIE`: Cookie holding the anti-forgery token
//! - `STOREFRONT_USER_AGENT`: User agent sent with every request
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./storefront.json` or `./storefront.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use storefront_domain::{ApiConfig, Config, Result, StorefrontError};

/// Load configuration with automatic fallback strategy
///
/// Uses environment variables when `STOREFRONT_API_BASE_URL` is set,
/// otherwise falls back to a config file.
///
/// # Errors
/// Returns `StorefrontError::Config` if:
/// - An environment value is invalid
/// - No config file is found when the environment has no base URL
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    if optional_env_var("STOREFRONT_API_BASE_URL").is_none() {
        tracing::debug!("STOREFRONT_API_BASE_URL not set, trying file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `STOREFRONT_API_BASE_URL` is required; unset optional variables
/// keep their defaults.
///
/// # Errors
/// Returns `StorefrontError::Config` if the base URL is missing or a value
/// is invalid.
pub fn load_from_env() -> Result<Config> {
    let mut api = ApiConfig::with_base_url(env_var("STOREFRONT_API_BASE_URL")?);

    if let Some(timeout) = optional_env_var("STOREFRONT_API_TIMEOUT_MS") {
        api.timeout_ms = timeout.parse::<u64>().map_err(|e| {
            StorefrontError::Config(format!("Invalid STOREFRONT_API_TIMEOUT_MS: {e}"))
        })?;
    }
    if let Some(path) = optional_env_var("STOREFRONT_API_REFRESH_PATH") {
        api.refresh_path = path;
    }
    if let Some(header) = optional_env_var("STOREFRONT_CSRF_HEADER") {
        api.csrf_header = header;
    }
    if let Some(cookie) = optional_env_var("STOREFRONT_CSRF_COOKIE") {
        api.csrf_cookie = cookie;
    }
    api.user_agent = optional_env_var("STOREFRONT_USER_AGENT");

    let config = Config { api };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `StorefrontError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(StorefrontError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            StorefrontError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| StorefrontError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Reject values that would make every request fail
fn validate(config: &Config) -> Result<()> {
    if config.api.base_url.trim().is_empty() {
        return Err(StorefrontError::Config("api.base_url must not be empty".to_string()));
    }
    if config.api.timeout_ms == 0 {
        return Err(StorefrontError::Config(
            "api.timeout_ms must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Parse configuration, detecting the format from the file extension
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| StorefrontError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| StorefrontError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(StorefrontError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["config.json", "config.toml", "storefront.json", "storefront.toml"];

    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
            roots.push(exe_dir.join(".."));
        }
    }

    roots
        .iter()
        .flat_map(|root| NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    optional_env_var(key).ok_or_else(|| {
        StorefrontError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Environment variable, treating empty values as unset
fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
