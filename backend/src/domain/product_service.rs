use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::commands::{CreateProductCommand, UpdateProductCommand};
use crate::domain::models::product::{NewProduct, Product, ProductChanges};
use crate::storage::ProductStorage;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product does not exist")]
    NotFound,
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Service for managing products.
///
/// Each operation performs exactly one storage call.
#[derive(Clone)]
pub struct ProductService {
    storage: Arc<dyn ProductStorage>,
}

impl ProductService {
    pub fn new(storage: Arc<dyn ProductStorage>) -> Self {
        Self { storage }
    }

    /// List every product, most expensive first
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        let products = self.storage.list_products().await?;
        info!("Found {} products", products.len());
        Ok(products)
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, ProductError> {
        match self.storage.get_product(id).await? {
            Some(product) => Ok(product),
            None => {
                warn!("Product not found: {}", id);
                Err(ProductError::NotFound)
            }
        }
    }

    /// Create a product; new products are always available
    pub async fn create_product(&self, command: CreateProductCommand) -> Result<Product, ProductError> {
        let new_product = NewProduct {
            name: command.name,
            price: command.price,
            availability: true,
            created_at: Utc::now(),
        };

        let product = self.storage.insert_product(&new_product).await?;
        info!("Created product: {} with ID: {}", product.name, product.id);
        Ok(product)
    }

    /// Replace name, price and availability of an existing product
    pub async fn update_product(&self, command: UpdateProductCommand) -> Result<Product, ProductError> {
        let changes = ProductChanges {
            name: command.name,
            price: command.price,
            availability: command.availability,
            updated_at: Utc::now(),
        };

        match self.storage.update_product(command.id, &changes).await? {
            Some(product) => {
                info!("Updated product: {} with ID: {}", product.name, product.id);
                Ok(product)
            }
            None => {
                warn!("Cannot update, product not found: {}", command.id);
                Err(ProductError::NotFound)
            }
        }
    }

    pub async fn toggle_availability(&self, id: i64) -> Result<Product, ProductError> {
        match self.storage.toggle_availability(id, Utc::now()).await? {
            Some(product) => {
                info!("Product {} availability is now {}", product.id, product.availability);
                Ok(product)
            }
            None => {
                warn!("Cannot toggle availability, product not found: {}", id);
                Err(ProductError::NotFound)
            }
        }
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ProductError> {
        if self.storage.delete_product(id).await? {
            info!("Deleted product with ID: {}", id);
            Ok(())
        } else {
            warn!("Cannot delete, product not found: {}", id);
            Err(ProductError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DbConnection, ProductRepository};

    async fn setup_test_service() -> ProductService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        ProductService::new(Arc::new(ProductRepository::new(db)))
    }

    fn create_command(name: &str, price: f64) -> CreateProductCommand {
        CreateProductCommand {
            name: name.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_create_product_defaults_to_available() {
        let service = setup_test_service().await;

        let product = service
            .create_product(create_command("Mouse - Testing", 50.0))
            .await
            .expect("Failed to create product");

        assert!(product.availability);
        assert_eq!(product.name, "Mouse - Testing");
        assert_eq!(product.price, 50.0);
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let service = setup_test_service().await;

        let err = service.get_product(2000).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound));
        assert_eq!(err.to_string(), "Product does not exist");
    }

    #[tokio::test]
    async fn test_update_product_replaces_everything() {
        let service = setup_test_service().await;
        let created = service
            .create_product(create_command("Monitor", 300.0))
            .await
            .expect("Failed to create product");

        let updated = service
            .update_product(UpdateProductCommand {
                id: created.id,
                name: "Curved monitor".to_string(),
                price: 399.0,
                availability: false,
            })
            .await
            .expect("Failed to update product");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Curved monitor");
        assert_eq!(updated.price, 399.0);
        assert!(!updated.availability);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let service = setup_test_service().await;

        let result = service
            .update_product(UpdateProductCommand {
                id: 2000,
                name: "Ghost".to_string(),
                price: 10.0,
                availability: true,
            })
            .await;

        assert!(matches!(result, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_availability() {
        let service = setup_test_service().await;
        let created = service
            .create_product(create_command("Keyboard", 120.0))
            .await
            .expect("Failed to create product");

        let first = service.toggle_availability(created.id).await.expect("Failed to toggle");
        assert_eq!(first.availability, !created.availability);

        let second = service.toggle_availability(created.id).await.expect("Failed to toggle");
        assert_eq!(second.availability, created.availability);
    }

    #[tokio::test]
    async fn test_toggle_missing_product_is_not_found() {
        let service = setup_test_service().await;

        let result = service.toggle_availability(2000).await;
        assert!(matches!(result, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = setup_test_service().await;
        let created = service
            .create_product(create_command("Webcam", 45.0))
            .await
            .expect("Failed to create product");

        service.delete_product(created.id).await.expect("Failed to delete product");

        assert!(matches!(service.get_product(created.id).await, Err(ProductError::NotFound)));
        assert!(matches!(service.delete_product(created.id).await, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let db = DbConnection::new("sqlite:/nonexistent-dir/for/products.db")
            .expect("Handle creation should not touch the database");
        let service = ProductService::new(Arc::new(ProductRepository::new(db)));

        let result = service.list_products().await;
        assert!(matches!(result, Err(ProductError::Storage(_))));
    }
}
