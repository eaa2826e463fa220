//! Authentication payloads

use serde::{Deserialize, Serialize};

/// Body returned by the token renewal endpoint.
///
/// Some deployments send the renewed token only as an `access` cookie and
/// answer with a bare `{"message": ...}`, so both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    /// Renewed bearer token
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Email verification with the one-time code mailed at registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub otp: String,
}

/// Body of the three-step password reset flow.
///
/// Step 1 sends only `email`, step 2 adds `otp`, step 3 adds `new_password`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

/// Error body returned by the backend (`{"detail": "..."}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}
