//! Request descriptors and buffered responses

use std::fmt;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::ApiError;

/// A backend call that can be replayed after a token renewal.
///
/// The body is kept as a JSON value so the request can be rebuilt.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl ApiRequest {
    /// Request for `path`, relative to the API base URL
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, retried: false }
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body
    ///
    /// # Errors
    /// Returns [`ApiError::Decode`] if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Surface a 401 directly instead of renewing the token.
    ///
    /// For endpoints where 401 means bad credentials (login).
    pub fn without_refresh(mut self) -> Self {
        self.retried = true;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Whether this request has already used its one renewal attempt
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    pub(crate) fn mark_retried(&mut self) {
        self.retried = true;
    }

    pub fn summary(&self) -> RequestSummary {
        RequestSummary { method: self.method.clone(), path: self.path.clone() }
    }
}

/// Method and path of a request, for logs and the renewal queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub method: Method,
    pub path: String,
}

impl fmt::Display for RequestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Fully buffered backend response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self { status, headers, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as lossy UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    ///
    /// 204/205 responses and empty bodies decode from JSON `null`, so `()`
    /// and `Option<T>` work for endpoints that return nothing.
    ///
    /// # Errors
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        if self.status == StatusCode::NO_CONTENT
            || self.status == StatusCode::RESET_CONTENT
            || self.body.is_empty()
        {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "No content response ({}), but response type cannot be deserialized from empty body",
                    self.status.as_u16()
                ))
            });
        }

        serde_json::from_slice(&self.body)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
    }
}
