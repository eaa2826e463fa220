//! Login status check

use std::sync::Arc;

use tracing::{debug, warn};

use super::credentials::usable_token;
use super::ports::{AccessTokenRefresher, CredentialStore};

/// Answers "is the user logged in?" from stored credentials.
pub struct SessionGuard {
    credentials: Arc<dyn CredentialStore>,
    refresher: Arc<dyn AccessTokenRefresher>,
}

impl SessionGuard {
    /// Create a new session guard
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        refresher: Arc<dyn AccessTokenRefresher>,
    ) -> Self {
        Self { credentials, refresher }
    }

    /// Whether the user has a usable session.
    ///
    /// A usable access token is enough. Without one, a usable refresh token
    /// triggers a renewal and the answer is whether that renewal succeeded.
    pub async fn is_logged_in(&self) -> bool {
        if usable_token(self.credentials.access_token()).is_some() {
            return true;
        }

        if usable_token(self.credentials.refresh_token()).is_none() {
            debug!("no usable credentials stored");
            return false;
        }

        match self.refresher.refresh_access_token().await {
            Ok(_) => true,
            Err(err) => {
                warn!(error = %err, "session renewal failed");
                false
            }
        }
    }
}
