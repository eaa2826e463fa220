//! Order payloads

use serde::{Deserialize, Serialize};

/// Draft order built from selected cart items and coupons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporaryOrderRequest {
    pub cart_item_ids: Vec<u64>,
    #[serde(default)]
    pub coupon_ids: Vec<u64>,
}
