use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use std::sync::Arc;

/// DbConnection owns the process-wide connection pool
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
    url: String,
}

impl DbConnection {
    /// Create a connection handle.
    ///
    /// No connection is opened yet, so this only fails on a malformed URL.
    /// Call [`DbConnection::connect`] to reach the database and set up the schema.
    pub fn new(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new().connect_lazy(url)?;

        Ok(Self {
            pool: Arc::new(pool),
            url: url.to_string(),
        })
    }

    /// Reach the database, creating it when missing, and make sure the schema exists
    pub async fn connect(&self) -> Result<()> {
        if !Sqlite::database_exists(&self.url).await.unwrap_or(false) {
            Sqlite::create_database(&self.url).await?
        }

        sqlx::query("SELECT 1").execute(self.pool()).await?;

        Self::setup_schema(self.pool()).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        let db = Self::new(&db_url)?;
        db.connect().await?;
        Ok(db)
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                price REAL NOT NULL CHECK (price > 0),
                availability BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // List is always ordered by price
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_products_price
            ON products(price DESC);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
