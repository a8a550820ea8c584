//! Stand-in store used when no database handle could be built at startup.
//! Every call fails, so the REST layer answers with a server error.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::models::product::{NewProduct, Product, ProductChanges};
use crate::storage::traits::ProductStorage;

#[derive(Debug, Clone)]
pub struct UnavailableStorage {
    reason: String,
}

impl UnavailableStorage {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn error<T>(&self) -> Result<T> {
        Err(anyhow!("Database is not available: {}", self.reason))
    }
}

#[async_trait]
impl ProductStorage for UnavailableStorage {
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.error()
    }

    async fn get_product(&self, _id: i64) -> Result<Option<Product>> {
        self.error()
    }

    async fn insert_product(&self, _product: &NewProduct) -> Result<Product> {
        self.error()
    }

    async fn update_product(&self, _id: i64, _changes: &ProductChanges) -> Result<Option<Product>> {
        self.error()
    }

    async fn toggle_availability(&self, _id: i64, _updated_at: DateTime<Utc>) -> Result<Option<Product>> {
        self.error()
    }

    async fn delete_product(&self, _id: i64) -> Result<bool> {
        self.error()
    }
}
