//! Order endpoints

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use storefront_domain::TemporaryOrderRequest;

use crate::api::{ApiClient, ApiError};

pub struct OrderService {
    client: Arc<ApiClient>,
}

impl OrderService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn order(&self, order_id: u64) -> Result<Value, ApiError> {
        self.client.get(&format!("/orders/{order_id}")).await
    }

    /// Order history, filtered by query parameters (status, page, ...)
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn orders(&self, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.client.get_with_query("/orders/", query).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn create_order<B: Serialize + ?Sized>(&self, order: &B) -> Result<Value, ApiError> {
        self.client.post("/orders/", order).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn cancel_order(&self, order_id: u64) -> Result<Value, ApiError> {
        self.client.post_empty(&format!("/orders/{order_id}/cancel/")).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn delete_order(&self, order_id: u64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/orders/{order_id}/")).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn process_order(&self, order_id: u64) -> Result<Value, ApiError> {
        self.client.post_empty(&format!("/orders/{order_id}/process/")).await
    }

    /// Draft an order from cart items, with optional coupons applied
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn create_temporary_order(
        &self,
        cart_item_ids: &[u64],
        coupon_ids: &[u64],
    ) -> Result<Value, ApiError> {
        let body = TemporaryOrderRequest {
            cart_item_ids: cart_item_ids.to_vec(),
            coupon_ids: coupon_ids.to_vec(),
        };
        self.client.post("/orders/temporary/", &body).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::ApiClientConfig;

    fn service(server: &MockServer) -> OrderService {
        let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
        OrderService::new(Arc::new(ApiClient::new(config).unwrap()))
    }

    #[tokio::test]
    async fn test_order_lifecycle_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/orders/7/cancel/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "cancelled" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/orders/7/process/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "processing" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/orders/7/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let orders = service(&server);
        assert_eq!(orders.order(7).await.unwrap()["id"], 7);
        assert_eq!(orders.cancel_order(7).await.unwrap()["status"], "cancelled");
        assert_eq!(orders.process_order(7).await.unwrap()["status"], "processing");
        assert_eq!(orders.delete_order(7).await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_orders_query_and_create() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders/"))
            .and(query_param("status", "pending"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/orders/"))
            .and(body_json(json!({ "payment_method": 1 })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 11 })))
            .mount(&server)
            .await;

        let orders = service(&server);
        assert_eq!(orders.orders(&[("status", "pending".to_string())]).await.unwrap(), json!([]));
        let created = orders.create_order(&json!({ "payment_method": 1 })).await.unwrap();
        assert_eq!(created["id"], 11);
    }

    #[tokio::test]
    async fn test_temporary_order_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orders/temporary/"))
            .and(body_json(json!({ "cart_item_ids": [3, 4], "coupon_ids": [] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 250 })))
            .expect(1)
            .mount(&server)
            .await;

        let draft = service(&server).create_temporary_order(&[3, 4], &[]).await.unwrap();
        assert_eq!(draft["total"], 250);
    }
}
