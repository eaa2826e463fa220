//! Integration tests for single-flight token renewal
//!
//! Drives the API client against a mock backend whose renewal endpoint is
//! slow enough that concurrent 401s overlap the in-flight renewal.

mod support;

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::{json, Value};
use storefront_core::{CredentialStore, RefreshError, SessionGuard};
use storefront_infra::api::{ApiClientConfig, ApiError};
use reqwest::cookie::Jar;
use reqwest::Url;
use storefront_infra::credentials::{MemoryCredentialStore, StaticAntiForgeryToken};
use storefront_infra::ApiClient;
use support::{
    client_for, expired_session, init_test_logger, mount_protected, mount_refresh,
    mount_refresh_failure, refresh_calls, requests_with_token, CSRF_TOKEN, EXPIRED_TOKEN,
    REFRESH_PATH, RENEWED_TOKEN,
};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RENEWAL_DELAY: Duration = Duration::from_millis(300);

#[tokio::test]
async fn concurrent_401s_share_one_renewal() {
    let server = MockServer::start().await;
    mount_refresh(&server, RENEWED_TOKEN, RENEWAL_DELAY, 1).await;
    mount_protected(&server, "/cart/", json!({ "items": [1] })).await;
    mount_protected(&server, "/orders/", json!([{ "id": 5 }])).await;

    let store = expired_session();
    let client = client_for(&server, Arc::clone(&store));

    let (cart, orders) = tokio::join!(client.get::<Value>("/cart/"), client.get::<Value>("/orders/"));

    assert_eq!(cart.unwrap(), json!({ "items": [1] }));
    assert_eq!(orders.unwrap(), json!([{ "id": 5 }]));
    assert_eq!(refresh_calls(&server).await, 1);
    assert_eq!(store.access_token().as_deref(), Some(RENEWED_TOKEN));
    assert!(!client.is_refreshing());
}

#[tokio::test]
async fn every_parked_request_is_replayed_once_with_the_new_token() {
    let server = MockServer::start().await;
    mount_refresh(&server, RENEWED_TOKEN, RENEWAL_DELAY, 1).await;

    let routes: Vec<String> = (0..6).map(|i| format!("/products/{i}/")).collect();
    for route in &routes {
        mount_protected(&server, route, json!({ "route": route })).await;
    }

    let client = client_for(&server, expired_session());

    let results = join_all(routes.iter().map(|route| client.get::<Value>(route))).await;

    for (route, result) in routes.iter().zip(results) {
        assert_eq!(result.unwrap(), json!({ "route": route }));
        assert_eq!(requests_with_token(&server, route, EXPIRED_TOKEN).await, 1);
        assert_eq!(requests_with_token(&server, route, RENEWED_TOKEN).await, 1);
    }
    assert_eq!(refresh_calls(&server).await, 1);
}

#[tokio::test]
async fn failed_renewal_rejects_every_caller_and_reopens() {
    let server = MockServer::start().await;
    mount_refresh_failure(&server, 401, RENEWAL_DELAY).await;
    mount_protected(&server, "/cart/", json!({})).await;
    mount_protected(&server, "/orders/", json!({})).await;

    let client = client_for(&server, expired_session());

    let (cart, orders) = tokio::join!(client.get::<Value>("/cart/"), client.get::<Value>("/orders/"));

    for result in [cart, orders] {
        let err = result.unwrap_err();
        assert!(
            matches!(err, ApiError::RefreshFailed(RefreshError::Rejected { status: 401 })),
            "unexpected error: {err:?}"
        );
    }
    assert_eq!(refresh_calls(&server).await, 1);
    assert!(!client.is_refreshing());

    // A later 401 starts a fresh renewal cycle
    let later = client.get::<Value>("/cart/").await;
    assert!(matches!(later, Err(ApiError::RefreshFailed(_))));
    assert_eq!(refresh_calls(&server).await, 2);
}

#[tokio::test]
async fn renewal_delivered_only_as_cookie_is_picked_up_from_the_jar() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .and(header("X-CSRFToken", CSRF_TOKEN))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", format!("access={RENEWED_TOKEN}; Path=/").as_str())
                .set_body_json(json!({ "message": "Token refreshed successfully" }))
                .set_delay(RENEWAL_DELAY),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_protected(&server, "/cart/", json!({ "items": [] })).await;
    mount_protected(&server, "/orders/", json!([])).await;

    let url = Url::parse(&server.uri()).unwrap();
    let jar = Arc::new(Jar::default());
    jar.add_cookie_str(&format!("access={EXPIRED_TOKEN}; Path=/"), &url);
    jar.add_cookie_str("refresh=refresh-cookie; Path=/", &url);

    let client = ApiClient::builder()
        .config(ApiClientConfig { base_url: server.uri(), ..Default::default() })
        .cookie_jar(jar)
        .anti_forgery(Arc::new(StaticAntiForgeryToken::new(CSRF_TOKEN)))
        .build()
        .unwrap();

    let (cart, orders) = tokio::join!(client.get::<Value>("/cart/"), client.get::<Value>("/orders/"));

    assert_eq!(cart.unwrap(), json!({ "items": [] }));
    assert_eq!(orders.unwrap(), json!([]));
    assert_eq!(client.credentials().access_token().as_deref(), Some(RENEWED_TOKEN));
    assert_eq!(refresh_calls(&server).await, 1);
}

#[tokio::test]
async fn replayed_401_is_surfaced_without_a_third_attempt() {
    let server = MockServer::start().await;
    mount_refresh(&server, RENEWED_TOKEN, Duration::ZERO, 1).await;

    Mock::given(method("GET"))
        .and(path("/cart/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, expired_session());

    let err = client.get::<Value>("/cart/").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn non_401_failures_pass_through_untouched() {
    let server = MockServer::start().await;
    mount_refresh(&server, RENEWED_TOKEN, Duration::ZERO, 0).await;

    Mock::given(method("GET"))
        .and(path("/cart/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = ApiClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_millis(100),
        ..Default::default()
    };
    let client = ApiClient::builder()
        .config(config)
        .credentials(expired_session())
        .build()
        .unwrap();

    let forbidden = client.get::<Value>("/cart/").await.unwrap_err();
    assert!(matches!(forbidden, ApiError::Status { status: 403, ref body } if body == "forbidden"));

    let timed_out = client.get::<Value>("/orders/").await.unwrap_err();
    assert!(matches!(timed_out, ApiError::Timeout(_)));

    assert_eq!(refresh_calls(&server).await, 0);
}

#[tokio::test]
async fn unusable_tokens_are_never_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories/"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    for token in [None, Some(""), Some("undefined")] {
        let store = Arc::new(MemoryCredentialStore::with_tokens(token, None));
        let client = client_for(&server, store);
        let result: Value = client.get("/categories/").await.unwrap();
        assert_eq!(result, json!([]), "token {token:?} should not be attached");
    }
}

#[tokio::test]
async fn renewal_outcome_is_logged_with_waiter_count() {
    let (logs, _guard) = init_test_logger();

    let server = MockServer::start().await;
    mount_refresh(&server, RENEWED_TOKEN, RENEWAL_DELAY, 1).await;
    mount_protected(&server, "/cart/", json!({})).await;
    mount_protected(&server, "/orders/", json!({})).await;

    let client = client_for(&server, expired_session());
    let (cart, orders) = tokio::join!(client.get::<Value>("/cart/"), client.get::<Value>("/orders/"));
    assert!(cart.is_ok() && orders.is_ok());

    assert!(logs.contains("INFO", "access token renewed"));
    assert!(logs.contains("INFO", "waiters=1"));
    assert!(!logs.contents().contains(RENEWED_TOKEN), "token values must not be logged");
}

#[tokio::test]
async fn session_guard_renews_from_refresh_token() {
    let server = MockServer::start().await;
    mount_refresh(&server, RENEWED_TOKEN, Duration::ZERO, 1).await;

    let store = Arc::new(MemoryCredentialStore::with_tokens(Some("undefined"), Some("refresh")));
    let client = client_for(&server, Arc::clone(&store));
    let guard = SessionGuard::new(store.clone(), client);

    assert!(guard.is_logged_in().await);
    assert_eq!(store.access_token().as_deref(), Some(RENEWED_TOKEN));
}
