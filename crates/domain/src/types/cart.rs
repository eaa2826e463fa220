//! Cart payloads

use serde::{Deserialize, Serialize};

/// Add a product variant to the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartItemRequest {
    pub quantity: u32,
    pub variant: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveCartItemsRequest {
    pub cart_item_ids: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeVariantRequest {
    pub new_variant_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeQuantityRequest {
    pub quantity: u32,
}

/// Provisional invoice request; the order info shape is owned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporaryInvoiceRequest {
    pub temp_order_infor: serde_json::Value,
}
