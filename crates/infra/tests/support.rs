#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use storefront_infra::api::{ApiClient, ApiClientConfig};
use storefront_infra::credentials::{MemoryCredentialStore, StaticAntiForgeryToken};
use tracing::subscriber::DefaultGuard;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const REFRESH_PATH: &str = "/auth/refresh-token/";
pub const EXPIRED_TOKEN: &str = "expired";
pub const RENEWED_TOKEN: &str = "newtok";
pub const CSRF_TOKEN: &str = "csrf-test-token";

/// Client against `server` with tokens kept in memory.
pub fn client_for(server: &MockServer, store: Arc<MemoryCredentialStore>) -> Arc<ApiClient> {
    let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
    let client = ApiClient::builder()
        .config(config)
        .credentials(store)
        .anti_forgery(Arc::new(StaticAntiForgeryToken::new(CSRF_TOKEN)))
        .build()
        .expect("api client should build");
    Arc::new(client)
}

/// Store holding an expired access token and a refresh token.
pub fn expired_session() -> Arc<MemoryCredentialStore> {
    Arc::new(MemoryCredentialStore::with_tokens(Some(EXPIRED_TOKEN), Some("refresh-cookie")))
}

/// Renewal endpoint answering `{"access": token}` after `delay`.
pub async fn mount_refresh(server: &MockServer, token: &str, delay: Duration, expected: u64) {
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .and(header("X-CSRFToken", CSRF_TOKEN))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access": token })).set_delay(delay),
        )
        .expect(expected)
        .mount(server)
        .await;
}

/// Renewal endpoint answering with `status` after `delay`.
pub async fn mount_refresh_failure(server: &MockServer, status: u16, delay: Duration) {
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(status).set_delay(delay))
        .mount(server)
        .await;
}

/// Protected GET endpoint: 401 for the expired token, `body` for the renewed one.
pub async fn mount_protected(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("Authorization", format!("Bearer {EXPIRED_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(route))
        .and(header("Authorization", format!("Bearer {RENEWED_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Requests the server saw for `route` with the given bearer token.
pub async fn requests_with_token(server: &MockServer, route: &str, token: &str) -> usize {
    let expected = format!("Bearer {token}");
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == route)
        .filter(|request| {
            request
                .headers
                .get("Authorization")
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value == expected)
        })
        .count()
}

/// Number of calls the renewal endpoint received.
pub async fn refresh_calls(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == REFRESH_PATH)
        .count()
}

/// Handle for inspecting captured log output during tests.
#[derive(Clone, Default)]
pub struct LogHandle {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogHandle {
    /// All captured output.
    pub fn contents(&self) -> String {
        let guard = self.buffer.lock().expect("log mutex poisoned");
        String::from_utf8_lossy(&guard).into_owned()
    }

    /// Check whether a captured line at `level` contains `needle`.
    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.contents().lines().any(|line| line.contains(level) && line.contains(needle))
    }
}

impl io::Write for LogHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().expect("log mutex poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Capture tracing output on the current thread until the guard drops.
pub fn init_test_logger() -> (LogHandle, DefaultGuard) {
    let handle = LogHandle::default();
    let writer = handle.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    (handle, tracing::subscriber::set_default(subscriber))
}
