//! Access-token renewal
//!
//! The renewal endpoint reads the refresh token from its cookie, so the call
//! carries the anti-forgery header but never a bearer token. The renewed
//! token comes back in the JSON body, or only as an `access` cookie that the
//! shared jar has already stored.

use async_trait::async_trait;
use reqwest::Method;
use storefront_core::{usable_token, AccessTokenRefresher, RefreshError, RefreshResult};
use storefront_domain::RefreshTokenResponse;
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::RequestSummary;

impl ApiClient {
    /// Call the renewal endpoint once and store the new access token.
    ///
    /// Not single-flight on its own; callers go through the refresh gate.
    #[instrument(skip(self), fields(path = %self.config().refresh_path))]
    pub(super) async fn renew(&self) -> RefreshResult {
        let refresh_path = &self.config().refresh_path;
        let previous = usable_token(self.credentials().access_token());
        let builder = self.prepare(Method::POST, refresh_path);

        let response = self.dispatch(builder).await.map_err(|err| match err {
            ApiError::Timeout(after) => {
                RefreshError::Network(format!("renewal timed out after {after:?}"))
            }
            other => RefreshError::Network(other.to_string()),
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "renewal endpoint refused");
            return Err(RefreshError::Rejected { status: status.as_u16() });
        }

        let renewed: Option<RefreshTokenResponse> =
            response.json().map_err(|e| RefreshError::InvalidResponse(e.to_string()))?;

        let from_body = renewed.and_then(|body| body.access).filter(|token| !token.is_empty());
        if let Some(token) = from_body {
            self.credentials().set_access_token(&token);
            return Ok(token);
        }

        // Cookie-only delivery: the jar already holds whatever Set-Cookie sent
        match usable_token(self.credentials().access_token()) {
            Some(token) if previous.as_deref() != Some(token.as_str()) => {
                debug!("renewed access token taken from cookie");
                Ok(token)
            }
            _ => Err(RefreshError::InvalidResponse(
                "renewal response carried no new access token".to_string(),
            )),
        }
    }
}

#[async_trait]
impl AccessTokenRefresher for ApiClient {
    /// Renew the access token, sharing any renewal already in flight.
    async fn refresh_access_token(&self) -> Result<String, RefreshError> {
        let descriptor =
            RequestSummary { method: Method::POST, path: self.config().refresh_path.clone() };
        self.gate.refresh_once(descriptor, || self.renew()).await
    }
}
