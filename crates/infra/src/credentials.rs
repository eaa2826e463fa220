//! Credential stores
//!
//! The backend issues the access, refresh, and anti-forgery tokens as
//! cookies. [`CookieJarCredentials`] reads them straight from the shared
//! reqwest cookie jar, so whatever the server sets is what the client sends.

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Url;
use storefront_core::{AntiForgeryTokenProvider, CredentialStore};
use storefront_domain::constants::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use tracing::debug;

/// Credentials backed by the cookie jar the HTTP client uses
#[derive(Clone)]
pub struct CookieJarCredentials {
    jar: Arc<Jar>,
    url: Url,
    csrf_cookie: String,
}

impl CookieJarCredentials {
    /// Read cookies that `jar` would send to `url`
    pub fn new(jar: Arc<Jar>, url: Url, csrf_cookie: impl Into<String>) -> Self {
        Self { jar, url, csrf_cookie: csrf_cookie.into() }
    }

    /// Value of cookie `name` for the backend URL
    pub fn cookie(&self, name: &str) -> Option<String> {
        let header = self.jar.cookies(&self.url)?;
        let header = header.to_str().ok()?;

        header.split(';').map(str::trim).find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.trim_matches('"').to_string())
        })
    }

    fn write_cookie(&self, name: &str, value: &str, expire: bool) {
        let cookie = if expire {
            format!("{name}={value}; Path=/; Max-Age=0")
        } else {
            format!("{name}={value}; Path=/")
        };
        self.jar.add_cookie_str(&cookie, &self.url);
    }
}

impl CredentialStore for CookieJarCredentials {
    fn access_token(&self) -> Option<String> {
        self.cookie(ACCESS_TOKEN_COOKIE)
    }

    fn refresh_token(&self) -> Option<String> {
        self.cookie(REFRESH_TOKEN_COOKIE)
    }

    fn set_access_token(&self, token: &str) {
        self.write_cookie(ACCESS_TOKEN_COOKIE, token, false);
    }

    fn clear(&self) {
        debug!("clearing credential cookies");
        self.write_cookie(ACCESS_TOKEN_COOKIE, "", true);
        self.write_cookie(REFRESH_TOKEN_COOKIE, "", true);
    }
}

impl AntiForgeryTokenProvider for CookieJarCredentials {
    fn token(&self) -> Option<String> {
        self.cookie(&self.csrf_cookie).filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Default)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// In-process credential store, for tokens that do not live in cookies
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    tokens: RwLock<Tokens>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access: Option<&str>, refresh: Option<&str>) -> Self {
        Self {
            tokens: RwLock::new(Tokens {
                access: access.map(str::to_string),
                refresh: refresh.map(str::to_string),
            }),
        }
    }

    pub fn set_refresh_token(&self, token: &str) {
        self.tokens.write().refresh = Some(token.to_string());
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.tokens.read().access.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens.read().refresh.clone()
    }

    fn set_access_token(&self, token: &str) {
        self.tokens.write().access = Some(token.to_string());
    }

    fn clear(&self) {
        *self.tokens.write() = Tokens::default();
    }
}

/// Fixed anti-forgery token, or none at all
#[derive(Debug, Clone, Default)]
pub struct StaticAntiForgeryToken(Option<String>);

impl StaticAntiForgeryToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl AntiForgeryTokenProvider for StaticAntiForgeryToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}
