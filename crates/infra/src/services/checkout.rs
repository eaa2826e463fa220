//! Checkout reference data and payment

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiClient, ApiError};

/// Coupons, payment, shipping options, and the address hierarchy used at checkout.
pub struct CheckoutService {
    client: Arc<ApiClient>,
}

impl CheckoutService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn coupons(&self) -> Result<Value, ApiError> {
        self.client.get("/coupons/").await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn payment_methods(&self) -> Result<Value, ApiError> {
        self.client.get("/payment-methods/").await
    }

    /// Start a payment; the response carries the gateway redirect
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn process_payment<B: Serialize + ?Sized>(
        &self,
        payment: &B,
    ) -> Result<Value, ApiError> {
        self.client.post("/process-payment/", payment).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn shipping_methods(&self) -> Result<Value, ApiError> {
        self.client.get("/shipping-methods/").await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn delivery_methods(&self) -> Result<Value, ApiError> {
        self.client.get("/delivery-methods/").await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn order_statuses(&self) -> Result<Value, ApiError> {
        self.client.get("/order-statuses/").await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn provinces(&self) -> Result<Value, ApiError> {
        self.client.get("/provinces/").await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn districts(&self, province_id: u64) -> Result<Value, ApiError> {
        self.client.get(&format!("/provinces/{province_id}/districts/")).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn wards(&self, district_id: u64) -> Result<Value, ApiError> {
        self.client.get(&format!("/districts/{district_id}/wards/")).await
    }
}
