//! # Storage Traits
//!
//! Storage abstraction used by the domain layer, so the product service does
//! not depend on a particular database.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::models::product::{NewProduct, Product, ProductChanges};

/// Trait defining the interface for product storage operations.
///
/// Every method is a single statement against the store; methods addressing a
/// product by id return `None`/`false` when no such product exists.
#[async_trait]
pub trait ProductStorage: Send + Sync {
    /// List all products, most expensive first (ties in insertion order)
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Retrieve a specific product by ID
    async fn get_product(&self, id: i64) -> Result<Option<Product>>;

    /// Store a new product and return it with its generated ID
    async fn insert_product(&self, product: &NewProduct) -> Result<Product>;

    /// Replace the editable fields of a product
    async fn update_product(&self, id: i64, changes: &ProductChanges) -> Result<Option<Product>>;

    /// Flip the availability flag of a product
    async fn toggle_availability(&self, id: i64, updated_at: DateTime<Utc>) -> Result<Option<Product>>;

    /// Hard-delete a product.
    /// Returns true if the product was found and deleted
    async fn delete_product(&self, id: i64) -> Result<bool>;
}
