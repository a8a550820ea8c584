//! # REST API Interface Layer
//!
//! HTTP endpoints of the product catalogue:
//! - **product_apis**: CRUD routes under `/api/products`
//! - **validation**: per-route rules and the gate that rejects invalid requests
//! - **docs**: OpenAPI document and Swagger UI under `/docs`
//! - **cors**: the allow-listed origin policy
//! - **error**: translation of failures into JSON responses
//! - **mappers**: conversions between wire DTOs and domain types

pub mod cors;
pub mod docs;
pub mod error;
pub mod mappers;
pub mod product_apis;
pub mod validation;
