//! # Product Catalogue Backend
//!
//! REST API for creating, listing, updating, toggling and deleting products.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (CORS, validation, REST handlers, docs)
//!     ↓
//! Domain Layer (ProductService)
//!     ↓
//! Storage Layer (SQLite through sqlx)
//! ```
//!
//! The connection pool is created once in [`initialize_backend`] and reaches
//! the handlers through [`AppState`].

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::domain::ProductService;
use crate::io::rest::{cors, docs, product_apis};
use crate::io::CorsPolicy;
use crate::storage::{DbConnection, ProductRepository, ProductStorage, UnavailableStorage};

/// Application state shared with every handler
#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(db: DbConnection) -> Self {
        Self::with_storage(Arc::new(ProductRepository::new(db)))
    }

    pub fn with_storage(storage: Arc<dyn ProductStorage>) -> Self {
        Self {
            product_service: ProductService::new(storage),
        }
    }
}

/// Reach the database and set up the schema.
///
/// A failure is logged and reported as `false`; the server keeps running
/// without a working store.
pub async fn connect_db(db: &DbConnection) -> bool {
    match db.connect().await {
        Ok(()) => {
            info!("Connected to the database");
            true
        }
        Err(e) => {
            error!("There was an error on DB: {:#}", e);
            false
        }
    }
}

/// Initialize the backend with all required services.
///
/// Database problems never stop startup: a URL that cannot be parsed leaves
/// the state on an [`UnavailableStorage`], so store-backed routes answer 500.
pub async fn initialize_backend(config: &AppConfig) -> AppState {
    info!("Setting up database");
    let db = match DbConnection::new(&config.database_url) {
        Ok(db) => db,
        Err(e) => {
            error!("There was an error on DB: {:#}", e);
            return AppState::with_storage(Arc::new(UnavailableStorage::new(format!("{:#}", e))));
        }
    };
    connect_db(&db).await;

    info!("Setting up application state");
    AppState::new(db)
}

/// Create the Axum router with all routes and global middleware.
///
/// Layers are added innermost first, so a request meets the origin check,
/// then the CORS headers, then request logging.
pub fn create_router(app_state: AppState, cors_policy: CorsPolicy) -> Router {
    Router::new()
        .nest("/api/products", product_apis::router())
        .merge(docs::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_policy.layer())
        .layer(from_fn_with_state(cors_policy, cors::enforce_allowed_origin))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{
            header::{
                ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD,
                ORIGIN,
            },
            HeaderValue, Method, Request, StatusCode,
        },
    };
    use tower::util::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn test_connect_db_reports_failure_and_state_still_builds() {
        let config = AppConfig {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            database_url: "sqlite:/nonexistent-dir/for/products.db".to_string(),
            frontend_url: None,
        };

        let db = DbConnection::new(&config.database_url).expect("Handle creation should not fail");
        assert!(!connect_db(&db).await);

        let state = initialize_backend(&config).await;
        let app = create_router(state, CorsPolicy::permissive());

        let request = Request::builder()
            .uri("/api/products")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_connect_db_succeeds_for_test_database() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        assert!(connect_db(&db).await);
    }

    #[tokio::test]
    async fn test_disallowed_origin_never_reaches_products() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let policy = CorsPolicy::new(Some(HeaderValue::from_static("http://localhost:5173")));
        let app = create_router(AppState::new(db), policy);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/products")
            .header(ORIGIN, "http://evil.example")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"Mouse","price":50}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let list = Request::builder()
            .uri("/api/products")
            .header(ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(list).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:5173");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unparseable_database_url_still_serves() {
        let config = AppConfig {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            database_url: "sqlite:products.db?bogus=1".to_string(),
            frontend_url: None,
        };
        assert!(DbConnection::new(&config.database_url).is_err());

        let state = initialize_backend(&config).await;
        let app = create_router(state, CorsPolicy::permissive());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/products").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal server error");

        let docs = app
            .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(docs.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_preflight_from_allowed_origin() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let policy = CorsPolicy::new(Some(HeaderValue::from_static("http://localhost:5173")));
        let app = create_router(AppState::new(db), policy);

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/products/1")
            .header(ORIGIN, "http://localhost:5173")
            .header(ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:5173");
        let methods = response.headers()[ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
        assert!(methods.contains("PATCH"));
        assert!(methods.contains("DELETE"));
    }

    #[tokio::test]
    async fn test_preflight_from_other_origin_is_rejected() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let policy = CorsPolicy::new(Some(HeaderValue::from_static("http://localhost:5173")));
        let app = create_router(AppState::new(db), policy);

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/products")
            .header(ORIGIN, "http://evil.example")
            .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_docs_are_mounted() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let app = create_router(AppState::new(db), CorsPolicy::permissive());

        let response = app
            .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
