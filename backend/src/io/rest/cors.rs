//! CORS policy: a single allow-listed origin, or any origin when none is configured.

use axum::{
    extract::{Request, State},
    http::{header::ORIGIN, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::io::rest::error::ApiError;

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origin: Option<HeaderValue>,
}

impl CorsPolicy {
    pub fn new(allowed_origin: Option<HeaderValue>) -> Self {
        Self { allowed_origin }
    }

    /// Allow requests from any origin
    pub fn permissive() -> Self {
        Self::new(None)
    }

    pub fn allows(&self, origin: &HeaderValue) -> bool {
        match &self.allowed_origin {
            Some(allowed) => allowed == origin,
            None => true,
        }
    }

    /// Layer emitting the CORS response headers and answering preflight requests
    pub fn layer(&self) -> CorsLayer {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
            .allow_headers(Any);

        match &self.allowed_origin {
            Some(origin) => cors.allow_origin(origin.clone()),
            None => cors.allow_origin(Any),
        }
    }
}

/// Reject requests whose `Origin` header names an origin the policy does not allow.
///
/// Requests without an `Origin` header are not cross-origin and pass through.
pub async fn enforce_allowed_origin(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(ORIGIN) {
        if !policy.allows(origin) {
            warn!("Rejecting request from origin {:?}", origin);
            return ApiError::CorsRejected.into_response();
        }
    }

    next.run(request).await
}
