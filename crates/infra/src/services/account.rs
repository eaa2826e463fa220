//! Account endpoints: login, registration, email verification, password reset.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use storefront_infra::api::{ApiClient, ApiClientConfig};
//! use storefront_infra::services::AccountService;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(ApiClient::new(ApiClientConfig::default())?);
//! let accounts = AccountService::new(client);
//!
//! accounts.login("shopper@example.com", "hunter2").await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use storefront_domain::{LoginRequest, ResetPasswordRequest, VerifyEmailRequest};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::api::{ApiClient, ApiError, ApiRequest};

const USER_NOT_FOUND_DETAIL: &str = "User does not exist";
const INCORRECT_PASSWORD_DETAIL: &str = "Incorrect password";

/// Login outcomes the caller can act on
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("user does not exist")]
    UserNotFound,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AccountError {
    fn from_login(err: ApiError) -> Self {
        match (err.status(), err.detail().as_deref()) {
            (Some(404), Some(USER_NOT_FOUND_DETAIL)) => Self::UserNotFound,
            (Some(401), Some(INCORRECT_PASSWORD_DETAIL)) => Self::IncorrectPassword,
            _ => Self::Api(err),
        }
    }
}

/// Password reset is a three-step flow on one endpoint
#[derive(Debug, Clone, Copy)]
enum ResetStep {
    SendEmail = 1,
    VerifyOtp = 2,
    ChangePassword = 3,
}

pub struct AccountService {
    client: Arc<ApiClient>,
}

impl AccountService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Log in; the backend answers with credential cookies.
    ///
    /// A 401 here means wrong credentials, so it is never treated as an
    /// expired token.
    ///
    /// # Errors
    ///
    /// [`AccountError::UserNotFound`] / [`AccountError::IncorrectPassword`]
    /// for the two rejections the backend names, [`AccountError::Api`] for
    /// anything else
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AccountError> {
        let body = LoginRequest { email: email.to_string(), password: password.to_string() };
        let request = ApiRequest::new(Method::POST, "/auth/login/").json(&body)?.without_refresh();

        self.client.send(request).await.map_err(AccountError::from_login)?;
        info!("logged in");
        Ok(())
    }

    /// Create an account
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn register<B: Serialize + ?Sized>(&self, user: &B) -> Result<Value, ApiError> {
        self.client.post("/auth/register/", user).await
    }

    /// Confirm the email address with the one-time code sent to it
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn verify_email(&self, email: &str, otp: &str) -> Result<(), ApiError> {
        let body = VerifyEmailRequest { email: email.to_string(), otp: otp.to_string() };
        self.client.post::<_, Value>("/auth/verify-email/", &body).await.map(drop)
    }

    /// Log out and forget stored credentials.
    ///
    /// Returns whether the backend accepted the logout; failures are logged,
    /// not returned.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> bool {
        match self.client.post_empty::<Value>("/auth/logout/").await {
            Ok(_) => {
                self.client.credentials().clear();
                info!("logged out");
                true
            }
            Err(err) => {
                warn!(error = %err, "logout failed");
                false
            }
        }
    }

    /// Step 1: email a password-reset code
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn send_reset_password_email(&self, email: &str) -> Result<(), ApiError> {
        let body = ResetPasswordRequest { email: email.to_string(), ..Default::default() };
        self.reset_password(ResetStep::SendEmail, &body).await
    }

    /// Step 2: check the reset code
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn verify_reset_password_otp(&self, email: &str, otp: &str) -> Result<(), ApiError> {
        let body = ResetPasswordRequest {
            email: email.to_string(),
            otp: Some(otp.to_string()),
            ..Default::default()
        };
        self.reset_password(ResetStep::VerifyOtp, &body).await
    }

    /// Step 3: set the new password
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn change_password(&self, email: &str, new_password: &str) -> Result<(), ApiError> {
        let body = ResetPasswordRequest {
            email: email.to_string(),
            new_password: Some(new_password.to_string()),
            ..Default::default()
        };
        self.reset_password(ResetStep::ChangePassword, &body).await
    }

    async fn reset_password(
        &self,
        step: ResetStep,
        body: &ResetPasswordRequest,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::POST, "/auth/reset-password/")
            .query("step", step as u8)
            .json(body)?;
        self.client.send(request).await.map(drop)
    }
}
