//! Shopping cart endpoints

use std::sync::Arc;

use serde_json::Value;
use storefront_domain::{
    AddCartItemRequest, ChangeQuantityRequest, ChangeVariantRequest, RemoveCartItemsRequest,
    TemporaryInvoiceRequest,
};

use crate::api::{ApiClient, ApiError};

pub struct CartService {
    client: Arc<ApiClient>,
}

impl CartService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Current user's cart
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn get_cart(&self) -> Result<Value, ApiError> {
        self.client.get("/cart/").await
    }

    /// Add `quantity` of a variant (`None` for products without variants)
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn add_item(&self, quantity: u32, variant: Option<u64>) -> Result<Value, ApiError> {
        self.client.post("/cart/", &AddCartItemRequest { quantity, variant }).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn remove_item(&self, cart_item_id: u64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/cart/{cart_item_id}/")).await
    }

    /// Remove several items in one call
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn remove_items(&self, cart_item_ids: &[u64]) -> Result<Value, ApiError> {
        let body = RemoveCartItemsRequest { cart_item_ids: cart_item_ids.to_vec() };
        self.client.delete_with_body("/cart/bulk-delete/", &body).await
    }

    /// Price a prospective order without placing it
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn temporary_invoice(&self, temp_order_infor: Value) -> Result<Value, ApiError> {
        self.client
            .post("/cart/temporary-invoice", &TemporaryInvoiceRequest { temp_order_infor })
            .await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn change_variant(
        &self,
        cart_item_id: u64,
        new_variant_id: u64,
    ) -> Result<Value, ApiError> {
        self.client
            .patch(&format!("/cart/{cart_item_id}/"), &ChangeVariantRequest { new_variant_id })
            .await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn change_quantity(&self, cart_item_id: u64, quantity: u32) -> Result<Value, ApiError> {
        self.client.put(&format!("/cart/{cart_item_id}/"), &ChangeQuantityRequest { quantity }).await
    }
}
