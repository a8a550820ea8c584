//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain. Requests are validated
//! and translated into domain commands here; domain results and errors are
//! translated back into JSON envelopes (`data`, `error` or `errors`).

pub mod rest;

pub use rest::cors::CorsPolicy;
pub use rest::error::ApiError;
