use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use storefront_domain::StorefrontError;
use tracing::debug;

use crate::errors::InfraError;

/// HTTP transport with an optional shared cookie jar.
///
/// Each call is a single attempt with no deadline of its own; retry policy
/// and timeouts belong to the caller.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, StorefrontError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder once.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, StorefrontError> {
        let request = builder.build().map_err(|err| StorefrontError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    user_agent: Option<String>,
    cookie_jar: Option<Arc<Jar>>,
}

impl HttpClientBuilder {
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Store `Set-Cookie` responses in `jar` and send matching cookies back.
    pub fn cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    pub fn build(self) -> Result<HttpClient, StorefrontError> {
        let mut builder = ReqwestClient::builder().no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(jar) = self.cookie_jar {
            builder = builder.cookie_provider(jar);
        }

        let client = builder.build().map_err(|err| StorefrontError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
