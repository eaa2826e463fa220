//! Storefront constants
//!
//! Cookie names, header names, and endpoint paths the backend expects.

// Cookie names written by the backend's login and refresh responses
pub const ACCESS_TOKEN_COOKIE: &str = "access";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh";
pub const CSRF_TOKEN_COOKIE: &str = "csrftoken";

/// Value some clients write into the access cookie after a failed login.
/// Never sent as a credential.
pub const UNDEFINED_TOKEN_SENTINEL: &str = "undefined";

// Headers
pub const CSRF_HEADER: &str = "X-CSRFToken";

// Endpoints (relative to the API base URL)
pub const REFRESH_TOKEN_PATH: &str = "/auth/refresh-token/";

// Client defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
