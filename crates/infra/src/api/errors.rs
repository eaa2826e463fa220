//! API-specific error types
//!
//! Classifies failures surfaced by [`super::ApiClient`].

use std::time::Duration;

use storefront_core::RefreshError;
use storefront_domain::{ErrorDetail, StorefrontError};
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401 after renewal, or renewal itself failed
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except 401 and 429, or a request that could not be built)
    Client,
    /// Network/connection errors and timeouts
    Network,
    /// Configuration errors
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {body}")]
    Unauthorized { body: String },

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Access token renewal failed: {0}")]
    RefreshFailed(#[source] RefreshError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Unauthorized { .. } | Self::RefreshFailed(_) => ApiErrorCategory::Authentication,
            Self::Status { status: 429, .. } => ApiErrorCategory::RateLimit,
            Self::Status { status, .. } if *status >= 500 => ApiErrorCategory::Server,
            Self::Status { .. } | Self::Decode(_) | Self::InvalidRequest(_) => {
                ApiErrorCategory::Client
            }
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// HTTP status the backend answered with, if the failure came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's `detail` message, when the error body carries one
    pub fn detail(&self) -> Option<String> {
        let body = match self {
            Self::Unauthorized { body } | Self::Status { body, .. } => body,
            _ => return None,
        };
        serde_json::from_str::<ErrorDetail>(body).ok().and_then(|parsed| parsed.detail)
    }
}

impl From<StorefrontError> for ApiError {
    fn from(err: StorefrontError) -> Self {
        match err {
            StorefrontError::Network(message) => Self::Network(message),
            StorefrontError::InvalidInput(message) => Self::InvalidRequest(message),
            StorefrontError::Config(message) => Self::Config(message),
        }
    }
}
