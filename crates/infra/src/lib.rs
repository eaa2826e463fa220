//! # Storefront Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - HTTP transport (`reqwest` with a shared cookie jar)
//! - The authenticated API client with single-flight token renewal
//! - Cookie-jar and in-memory credential stores
//! - Configuration loading (environment and JSON/TOML files)
//! - Resource services for each backend area
//!
//! ## Architecture
//! - Implements traits defined in `storefront-core`
//! - Depends on `storefront-domain` and `storefront-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod api;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod http;
pub mod services;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientBuilder, ApiClientConfig, ApiError, ApiRequest, ApiResponse};
pub use credentials::{CookieJarCredentials, MemoryCredentialStore, StaticAntiForgeryToken};
pub use http::*;
