//! Authenticated storefront API client
//!
//! Every backend call goes through [`ApiClient::send`], which attaches the
//! anti-forgery header and the bearer token, and recovers from an expired
//! access token by renewing it once for all concurrent callers and replaying
//! the failed requests.
//!
//! # Architecture
//!
//! - Transport via [`crate::http::HttpClient`] with a shared cookie jar
//! - Credentials behind the `CredentialStore` port
//! - Single-flight renewal through `storefront_core::RefreshGate`
//! - Non-401 failures are surfaced verbatim, never retried

pub mod auth;
pub mod client;
pub mod errors;
pub mod request;

pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use errors::{ApiError, ApiErrorCategory};
pub use request::{ApiRequest, ApiResponse, RequestSummary};
