//! Error types used throughout the storefront client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the storefront client
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum StorefrontError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for storefront operations
pub type Result<T> = std::result::Result<T, StorefrontError>;
