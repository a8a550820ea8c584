//! Process configuration read from the environment.

use axum::http::{header::InvalidHeaderValue, HeaderValue};
use std::env;
use thiserror::Error;
use tracing::info;

const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
const DEFAULT_SERVER_PORT: u16 = 4000;
const DEFAULT_DATABASE_URL: &str = "sqlite:products.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid SERVER_PORT '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid FRONTEND_URL '{value}': {source}")]
    InvalidOrigin {
        value: String,
        #[source]
        source: InvalidHeaderValue,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    /// The single origin allowed by the CORS policy. `None` allows any origin.
    pub frontend_url: Option<HeaderValue>,
}

impl AppConfig {
    /// Read the configuration from process environment variables.
    ///
    /// A `.env` file is not loaded here; `main` does that before logging starts
    /// so `RUST_LOG` can come from it as well.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_env = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let server_host = get_env("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());
        let server_port = match get_env("SERVER_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_SERVER_PORT,
        };
        let database_url = get_env("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let frontend_url = get_env("FRONTEND_URL")
            .map(|value| {
                HeaderValue::from_str(value.trim())
                    .map_err(|source| ConfigError::InvalidOrigin { value, source })
            })
            .transpose()?;

        info!(
            "Configuration loaded: server={}:{}, cors_origin={:?}",
            server_host, server_port, frontend_url
        );

        Ok(Self {
            server_host,
            server_port,
            database_url,
            frontend_url,
        })
    }
}
