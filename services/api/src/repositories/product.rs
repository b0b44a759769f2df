//! Product repository with in-memory CRUD

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::product::{CreateProductRequest, Product, UpdateProductRequest};

/// Errors raised by product operations
#[derive(Error, Debug, PartialEq)]
pub enum ProductError {
    #[error("Invalid product: {0}")]
    Validation(String),

    #[error("Product {0} not found")]
    NotFound(Uuid),
}

fn validate_name(name: &str) -> Result<String, ProductError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProductError::Validation("Product name is required".to_string()));
    }
    if name.len() > 120 {
        return Err(ProductError::Validation(
            "Product name must be at most 120 characters long".to_string(),
        ));
    }
    Ok(name.to_string())
}

fn validate_price(price: f64) -> Result<f64, ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::Validation(
            "Product price must be a non-negative number".to_string(),
        ));
    }
    Ok(price)
}

/// Product repository holding every product in memory
#[derive(Clone, Default)]
pub struct ProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl ProductRepository {
    /// Create an empty product repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-filled with a few sample products
    pub fn seeded() -> Self {
        let now = Utc::now();
        let samples = [
            ("Temperature sensor", "Wall-mounted probe, -40 to 125 C", 24.5, 40),
            ("Door contact", "Magnetic reed switch", 9.99, 120),
            ("Gateway", "LTE gateway for up to 64 sensors", 189.0, 8),
        ];

        let products = samples
            .into_iter()
            .map(|(name, description, price, quantity)| Product {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: description.to_string(),
                price,
                quantity,
                created_at: now,
                updated_at: now,
            })
            .collect();

        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Get all products in insertion order
    pub async fn list(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    /// Find a product by ID
    pub async fn get(&self, id: Uuid) -> Result<Product, ProductError> {
        self.products
            .read()
            .await
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a new product
    pub async fn create(&self, payload: &CreateProductRequest) -> Result<Product, ProductError> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: validate_name(&payload.name)?,
            description: payload.description.clone().unwrap_or_default(),
            price: validate_price(payload.price)?,
            quantity: payload.quantity.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };

        self.products.write().await.push(product.clone());
        info!("Created product {}", product.id);
        Ok(product)
    }

    /// Apply the fields present in `payload` to an existing product
    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateProductRequest,
    ) -> Result<Product, ProductError> {
        let name = payload.name.as_deref().map(validate_name).transpose()?;
        let price = payload.price.map(validate_price).transpose()?;

        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or(ProductError::NotFound(id))?;

        if let Some(name) = name {
            product.name = name;
        }
        if let Some(description) = &payload.description {
            product.description = description.clone();
        }
        if let Some(price) = price {
            product.price = price;
        }
        if let Some(quantity) = payload.quantity {
            product.quantity = quantity;
        }
        product.updated_at = Utc::now();

        info!("Updated product {}", id);
        Ok(product.clone())
    }

    /// Delete a product by ID
    pub async fn delete(&self, id: Uuid) -> Result<(), ProductError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|product| product.id != id);

        if products.len() == before {
            return Err(ProductError::NotFound(id));
        }

        info!("Deleted product {}", id);
        Ok(())
    }
}
