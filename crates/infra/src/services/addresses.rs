//! Saved delivery addresses

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiClient, ApiError};

const ADDRESSES_PATH: &str = "/delivery-addresses/";

pub struct AddressService {
    client: Arc<ApiClient>,
}

impl AddressService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.client.get(ADDRESSES_PATH).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn create<B: Serialize + ?Sized>(&self, address: &B) -> Result<Value, ApiError> {
        self.client.post(ADDRESSES_PATH, address).await
    }

    /// Replace an address
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        address_id: u64,
        address: &B,
    ) -> Result<Value, ApiError> {
        self.client.put(&format!("{ADDRESSES_PATH}{address_id}/"), address).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn delete(&self, address_id: u64) -> Result<Value, ApiError> {
        self.client.delete(&format!("{ADDRESSES_PATH}{address_id}/")).await
    }

    /// Make an address the default for new orders
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn set_default(&self, address_id: u64) -> Result<Value, ApiError> {
        self.client.post_empty(&format!("{ADDRESSES_PATH}{address_id}/set-default/")).await
    }
}
