//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    CSRF_HEADER, CSRF_TOKEN_COOKIE, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_MS, REFRESH_TOKEN_PATH,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
}

/// Backend API configuration
///
/// Only `base_url` is required in config files; everything else falls back
/// to the backend's conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin plus API prefix, e.g. `https://shop.example.com/api/v1`
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,
    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie: String,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_refresh_path() -> String {
    REFRESH_TOKEN_PATH.to_string()
}

fn default_csrf_header() -> String {
    CSRF_HEADER.to_string()
}

fn default_csrf_cookie() -> String {
    CSRF_TOKEN_COOKIE.to_string()
}

impl ApiConfig {
    /// Configuration for `base_url` with every other field defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_ms: default_timeout_ms(),
            refresh_path: default_refresh_path(),
            csrf_header: default_csrf_header(),
            csrf_cookie: default_csrf_cookie(),
            user_agent: None,
        }
    }
}
