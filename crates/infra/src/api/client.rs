//! API client with single-flight token renewal
//!
//! Every call attaches the anti-forgery header and, when a usable access
//! token is stored, a bearer token. A 401 triggers at most one renewal per
//! request; concurrent 401s share a single renewal through [`RefreshGate`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use storefront_core::{
    bearer_value, usable_token, AntiForgeryTokenProvider, CredentialStore, RefreshGate,
    RefreshTicket,
};
use storefront_domain::constants::{
    CSRF_HEADER, CSRF_TOKEN_COOKIE, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_MS, REFRESH_TOKEN_PATH,
};
use storefront_domain::ApiConfig;
use tracing::{debug, info, instrument, warn};

use super::errors::ApiError;
use super::request::{ApiRequest, ApiResponse, RequestSummary};
use crate::credentials::CookieJarCredentials;
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "https://shop.example.com/api/v1")
    pub base_url: String,
    /// Deadline for a single backend call, body included
    pub timeout: Duration,
    /// Path of the access-token renewal endpoint
    pub refresh_path: String,
    /// Header carrying the anti-forgery token
    pub csrf_header: String,
    /// Cookie the anti-forgery token is read from
    pub csrf_cookie: String,
    pub user_agent: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            refresh_path: REFRESH_TOKEN_PATH.to_string(),
            csrf_header: CSRF_HEADER.to_string(),
            csrf_cookie: CSRF_TOKEN_COOKIE.to_string(),
            user_agent: None,
        }
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
            refresh_path: config.refresh_path.clone(),
            csrf_header: config.csrf_header.clone(),
            csrf_cookie: config.csrf_cookie.clone(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Authenticated client for the storefront backend
pub struct ApiClient {
    http: HttpClient,
    config: ApiClientConfig,
    base_url: String,
    csrf_header: HeaderName,
    credentials: Arc<dyn CredentialStore>,
    anti_forgery: Arc<dyn AntiForgeryTokenProvider>,
    pub(super) gate: RefreshGate<RequestSummary>,
}

impl ApiClient {
    /// Create a client backed by a fresh cookie jar
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL or header name is invalid
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        Self::builder().config(config).build()
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Credential store used for bearer tokens and renewal results
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Whether a token renewal is currently in flight
    pub fn is_refreshing(&self) -> bool {
        self.gate.is_refreshing()
    }

    /// Send `request`, renewing the access token once on a 401.
    ///
    /// Requests that arrive with a 401 while a renewal is already in flight
    /// wait for that renewal and are replayed with its token. A request is
    /// never renewed for twice; a second 401 is returned as
    /// [`ApiError::Unauthorized`].
    ///
    /// # Errors
    ///
    /// - [`ApiError::RefreshFailed`] if the renewal this request depended on failed
    /// - [`ApiError::Unauthorized`] / [`ApiError::Status`] for non-2xx answers
    /// - [`ApiError::Network`] / [`ApiError::Timeout`] for transport failures
    #[instrument(skip(self, request), fields(request = %request.summary()))]
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let token = usable_token(self.credentials.access_token());
        let response = self.execute(&request, token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED || request.is_retried() {
            return Self::check_status(response);
        }
        request.mark_retried();

        let token = match self.gate.acquire_or_wait(request.summary()) {
            RefreshTicket::Leader(leader) => {
                let result = self.renew().await;
                let notified = leader.resolve(result.clone());
                match result {
                    Ok(token) => {
                        info!(waiters = notified.len(), "access token renewed");
                        token
                    }
                    Err(err) => {
                        warn!(waiters = notified.len(), error = %err, "access token renewal failed");
                        return Err(ApiError::RefreshFailed(err));
                    }
                }
            }
            RefreshTicket::Waiter(waiter) => {
                debug!("waiting for in-flight token renewal");
                waiter.wait().await.map_err(ApiError::RefreshFailed)?
            }
        };

        debug!("replaying request with renewed token");
        let response = self.execute(&request, Some(&token)).await?;
        Self::check_status(response)
    }

    /// GET `path` and decode the JSON body
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; also [`ApiError::Decode`] for unexpected bodies
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::new(Method::GET, path)).await?.json()
    }

    /// GET `path` with query parameters
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`]
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = query
            .iter()
            .fold(ApiRequest::new(Method::GET, path), |request, (key, value)| {
                request.query(*key, value)
            });
        self.send(request).await?.json()
    }

    /// POST a JSON body
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// POST without a body
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`]
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::new(Method::POST, path)).await?.json()
    }

    /// PUT a JSON body
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// PATCH a JSON body
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`]
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    /// DELETE `path`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::new(Method::DELETE, path)).await?.json()
    }

    /// DELETE with a JSON body (bulk removals)
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`]
    pub async fn delete_with_body<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::DELETE, path, body).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(method, path).json(body)?;
        self.send(request).await?.json()
    }

    /// Absolute URL for a path relative to the base URL
    pub(crate) fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Request builder with content type and anti-forgery header attached
    pub(super) fn prepare(&self, method: Method, path: &str) -> RequestBuilder {
        let builder =
            self.http.request(method, self.url(path)).header(CONTENT_TYPE, "application/json");

        match self.anti_forgery.token() {
            Some(token) => builder.header(self.csrf_header.clone(), token),
            None => builder,
        }
    }

    async fn execute(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let mut builder = self.prepare(request.method().clone(), request.path());

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, bearer_value(token));
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        self.dispatch(builder).await
    }

    /// Send once and buffer the body, bounded by the configured timeout
    pub(super) async fn dispatch(&self, builder: RequestBuilder) -> Result<ApiResponse, ApiError> {
        let timeout = self.config.timeout;

        let call = async {
            let response = self.http.send(builder).await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response
                .bytes()
                .await
                .map_err(|e| ApiError::Network(format!("Failed to read response body: {e}")))?;
            Ok::<_, ApiError>(ApiResponse::new(status, headers, body.to_vec()))
        };

        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(timeout)),
        }
    }

    fn check_status(response: ApiResponse) -> Result<ApiResponse, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text();
        if status == StatusCode::UNAUTHORIZED {
            Err(ApiError::Unauthorized { body })
        } else {
            Err(ApiError::Status { status: status.as_u16(), body })
        }
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    credentials: Option<Arc<dyn CredentialStore>>,
    anti_forgery: Option<Arc<dyn AntiForgeryTokenProvider>>,
    cookie_jar: Option<Arc<Jar>>,
}

impl ApiClientBuilder {
    /// Set the configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override where tokens are read from and stored
    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override where the anti-forgery token is read from
    pub fn anti_forgery(mut self, provider: Arc<dyn AntiForgeryTokenProvider>) -> Self {
        self.anti_forgery = Some(provider);
        self
    }

    /// Share a cookie jar with other clients
    pub fn cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Build the API client
    ///
    /// Credentials and the anti-forgery token default to the cookie jar.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL or header name is invalid,
    /// or the HTTP client cannot be constructed
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();

        let url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("Invalid base URL '{}': {e}", config.base_url)))?;
        let csrf_header = HeaderName::from_bytes(config.csrf_header.as_bytes()).map_err(|e| {
            ApiError::Config(format!("Invalid anti-forgery header '{}': {e}", config.csrf_header))
        })?;

        let jar = self.cookie_jar.unwrap_or_default();
        let cookies = CookieJarCredentials::new(Arc::clone(&jar), url, config.csrf_cookie.clone());

        let credentials = self
            .credentials
            .unwrap_or_else(|| Arc::new(cookies.clone()) as Arc<dyn CredentialStore>);
        let anti_forgery = self
            .anti_forgery
            .unwrap_or_else(|| Arc::new(cookies) as Arc<dyn AntiForgeryTokenProvider>);

        let mut http = HttpClient::builder().cookie_jar(jar);
        if let Some(agent) = &config.user_agent {
            http = http.user_agent(agent.clone());
        }
        let http = http
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(ApiClient {
            http,
            config,
            base_url,
            csrf_header,
            credentials,
            anti_forgery,
            gate: RefreshGate::new(),
        })
    }
}
