//! # Storage Module
//!
//! Data persistence for the product catalogue.
//!
//! - **connection**: the pooled SQLite handle, created once per process
//! - **traits**: the storage interface the domain layer depends on
//! - **product_repository**: SQLite implementation of that interface
//! - **unavailable**: failing stand-in when no database handle can be built
//!
//! Queries are plain `sqlx::query` calls; each repository method is a single
//! statement, so concurrent writers are serialised by SQLite itself.

pub mod connection;
pub mod product_repository;
pub mod traits;
pub mod unavailable;

pub use connection::DbConnection;
pub use product_repository::ProductRepository;
pub use traits::ProductStorage;
pub use unavailable::UnavailableStorage;
