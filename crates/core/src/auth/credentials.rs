//! Token value helpers

use storefront_domain::constants::UNDEFINED_TOKEN_SENTINEL;

/// Filter a raw stored token down to one that may be sent as a credential.
///
/// Empty values and the literal string `"undefined"` are treated as absent.
pub fn usable_token(raw: Option<String>) -> Option<String> {
    raw.filter(|token| !token.is_empty() && token != UNDEFINED_TOKEN_SENTINEL)
}

/// `Authorization` header value for a bearer token
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}
