//! Product and category browsing

use std::sync::Arc;

use serde_json::Value;

use crate::api::{ApiClient, ApiError};

/// Read-only catalog endpoints; all of them work without a login.
pub struct CatalogService {
    client: Arc<ApiClient>,
}

impl CatalogService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Product listing filtered by arbitrary query parameters
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn products(&self, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.client.get_with_query("/products/", query).await
    }

    /// Newest products first
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn new_arrivals(&self, limit: Option<u32>) -> Result<Value, ApiError> {
        let mut query = vec![("latest", "true".to_string())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.products(&query).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn best_sellers(&self, limit: Option<u32>) -> Result<Value, ApiError> {
        let query: Vec<_> = limit.map(|limit| ("limit", limit.to_string())).into_iter().collect();
        self.client.get_with_query("/products/best-sellers/", &query).await
    }

    /// Single product; the backend accepts either its slug or its id
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn product(&self, slug_or_id: &str) -> Result<Value, ApiError> {
        self.client.get(&format!("/products/{slug_or_id}/")).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn product_sales(&self, product_id: u64) -> Result<Value, ApiError> {
        self.client.get(&format!("/products/{product_id}/sales")).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn product_variants(&self, slug: &str) -> Result<Value, ApiError> {
        self.client.get(&format!("/products/{slug}/variants/")).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn product_categories(&self, slug: &str) -> Result<Value, ApiError> {
        self.client.get(&format!("/products/{slug}/categories/")).await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn categories(&self) -> Result<Value, ApiError> {
        self.client.get("/categories/").await
    }

    /// # Errors
    ///
    /// Returns the backend's rejection as [`ApiError`]
    pub async fn category(&self, category_id: u64) -> Result<Value, ApiError> {
        self.client.get(&format!("/categories/{category_id}/")).await
    }
}
