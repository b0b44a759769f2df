//! HTTP clients for the alerts and products upstream
//!
//! Every call needs the bearer token of a live session; callers obtain it from
//! `SessionManager::bearer_token`.

use auth::client::{ClientResult, ensure_success};
use reqwest::Client;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::alerts::{Record, records_from_payload};
use crate::models::product::{CreateProductRequest, Product, UpdateProductRequest};

/// Client for the alerts listing
#[derive(Debug, Clone)]
pub struct AlertsClient {
    http: Client,
    base_url: String,
}

impl AlertsClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch every alert record
    pub async fn fetch_alerts(&self, token: &str) -> ClientResult<Vec<Record>> {
        let response = self
            .http
            .get(format!("{}/alerts", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        let payload: Value = ensure_success(response).await?.json().await?;
        let records = records_from_payload(payload);
        info!("Fetched {} alerts", records.len());

        Ok(records)
    }
}

/// Client for product CRUD
#[derive(Debug, Clone)]
pub struct ProductsClient {
    http: Client,
    base_url: String,
}

impl ProductsClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, id: Option<Uuid>) -> String {
        match id {
            Some(id) => format!("{}/products/{}", self.base_url, id),
            None => format!("{}/products", self.base_url),
        }
    }

    /// Get all products
    pub async fn list(&self, token: &str) -> ClientResult<Vec<Product>> {
        let response = self.http.get(self.url(None)).bearer_auth(token).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// Create a product
    pub async fn create(&self, token: &str, payload: &CreateProductRequest) -> ClientResult<Product> {
        let response = self
            .http
            .post(self.url(None))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// Update a product
    pub async fn update(
        &self,
        token: &str,
        id: Uuid,
        payload: &UpdateProductRequest,
    ) -> ClientResult<Product> {
        let response = self
            .http
            .put(self.url(Some(id)))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// Delete a product
    pub async fn delete(&self, token: &str, id: Uuid) -> ClientResult<()> {
        let response = self
            .http
            .delete(self.url(Some(id)))
            .bearer_auth(token)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
