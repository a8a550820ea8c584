//! # Domain Module
//!
//! Business logic for the product catalogue, independent of HTTP and of the
//! storage engine.
//!
//! - **product_service**: create, read, replace, toggle and delete products
//! - **commands**: validated inputs handed over by the REST layer
//! - **models**: the stored `Product` and its write-side shapes
//!
//! Business rules:
//! - A product's price is strictly positive (checked on input, enforced again by the store)
//! - New products start out available
//! - The availability toggle touches nothing but `availability` and `updated_at`
//! - Deletion is permanent; ids are never reused

pub mod commands;
pub mod models;
pub mod product_service;

pub use product_service::{ProductError, ProductService};
