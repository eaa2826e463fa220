//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use storefront_domain::StorefrontError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub StorefrontError);

impl From<InfraError> for StorefrontError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<StorefrontError> for InfraError {
    fn from(value: StorefrontError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoStorefrontError {
    fn into_storefront(self) -> StorefrontError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → StorefrontError */
/* -------------------------------------------------------------------------- */

impl IntoStorefrontError for HttpError {
    fn into_storefront(self) -> StorefrontError {
        if self.is_connect() {
            return StorefrontError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return StorefrontError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        StorefrontError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_storefront())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
