use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::product::{NewProduct, Product, ProductChanges};
use crate::storage::connection::DbConnection;
use crate::storage::traits::ProductStorage;

/// Repository for product operations
#[derive(Clone)]
pub struct ProductRepository {
    db: DbConnection,
}

impl ProductRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_product(row: &SqliteRow) -> Result<Product> {
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Product {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            availability: row.try_get("availability")?,
            created_at: parse_timestamp(&created_at).context("Invalid created_at in products table")?,
            updated_at: parse_timestamp(&updated_at).context("Invalid updated_at in products table")?,
        })
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

#[async_trait]
impl ProductStorage for ProductRepository {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price, availability, created_at, updated_at
            FROM products
            ORDER BY price DESC, id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_product).collect()
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, availability, created_at, updated_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn insert_product(&self, product: &NewProduct) -> Result<Product> {
        let created_at = format_timestamp(product.created_at);

        let row = sqlx::query(
            r#"
            INSERT INTO products (name, price, availability, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, price, availability, created_at, updated_at
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.availability)
        .bind(&created_at)
        .bind(&created_at)
        .fetch_one(self.db.pool())
        .await?;

        Self::row_to_product(&row)
    }

    async fn update_product(&self, id: i64, changes: &ProductChanges) -> Result<Option<Product>> {
        let row = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, price = ?, availability = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, name, price, availability, created_at, updated_at
            "#,
        )
        .bind(&changes.name)
        .bind(changes.price)
        .bind(changes.availability)
        .bind(format_timestamp(changes.updated_at))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn toggle_availability(&self, id: i64, updated_at: DateTime<Utc>) -> Result<Option<Product>> {
        let row = sqlx::query(
            r#"
            UPDATE products
            SET availability = NOT availability, updated_at = ?
            WHERE id = ?
            RETURNING id, name, price, availability, created_at, updated_at
            "#,
        )
        .bind(format_timestamp(updated_at))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn delete_product(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
