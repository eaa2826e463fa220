//! Port interfaces for credentials and token renewal
//!
//! These traits define the boundaries between the client logic and the
//! storage/transport implementations in `storefront-infra`.

use async_trait::async_trait;

use super::refresh::RefreshError;

/// Storage for the access/refresh credential pair.
///
/// Reads are raw: callers decide whether a value is usable via
/// [`usable_token`](super::credentials::usable_token).
pub trait CredentialStore: Send + Sync {
    /// Current access token, if any
    fn access_token(&self) -> Option<String>;

    /// Current refresh token, if any
    fn refresh_token(&self) -> Option<String>;

    /// Replace the access token after a renewal
    fn set_access_token(&self, token: &str);

    /// Forget both tokens (logout)
    fn clear(&self);
}

/// Source of the anti-forgery header value, read before every request
pub trait AntiForgeryTokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Something that can obtain a fresh access token
#[async_trait]
pub trait AccessTokenRefresher: Send + Sync {
    /// Renew the access token and return it
    ///
    /// # Errors
    /// Returns [`RefreshError`] if the renewal endpoint rejects the request,
    /// cannot be reached, or answers without a token.
    async fn refresh_access_token(&self) -> Result<String, RefreshError>;
}
