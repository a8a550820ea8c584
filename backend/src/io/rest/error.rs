use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ErrorResponse, FieldError, ValidationErrorResponse};
use thiserror::Error;
use tracing::error;

use crate::domain::ProductError;

/// Everything a REST handler or extractor can answer with besides success
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{} validation error(s)", .0.len())]
    Validation(Vec<FieldError>),
    /// Unknown product; the status differs between read and write operations
    #[error("Product does not exist")]
    ProductNotFound(StatusCode),
    /// The request could not be read (malformed JSON, oversized body, ...)
    #[error("{1}")]
    Rejected(StatusCode, String),
    #[error("CORS Error")]
    CorsRejected,
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Translate a domain error, answering unknown products with `not_found`
    pub fn from_product_error(err: ProductError, not_found: StatusCode) -> Self {
        match err {
            ProductError::NotFound => Self::ProductNotFound(not_found),
            ProductError::Storage(source) => Self::Internal(source),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        Self::from_product_error(err, StatusCode::NOT_FOUND)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        match self {
            Self::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationErrorResponse { errors })).into_response()
            }
            Self::ProductNotFound(status) | Self::Rejected(status, _) => {
                (status, Json(ErrorResponse::new(message))).into_response()
            }
            Self::CorsRejected => (StatusCode::FORBIDDEN, Json(ErrorResponse::new(message))).into_response(),
            Self::Internal(source) => {
                error!("Request failed: {:#}", source);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(message))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_requested_status() {
        let read = ApiError::from_product_error(ProductError::NotFound, StatusCode::BAD_REQUEST);
        assert_eq!(read.into_response().status(), StatusCode::BAD_REQUEST);

        let write = ApiError::from_product_error(ProductError::NotFound, StatusCode::NOT_FOUND);
        assert_eq!(write.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_errors_become_internal() {
        let err = ApiError::from_product_error(
            ProductError::Storage(anyhow::anyhow!("disk on fire")),
            StatusCode::NOT_FOUND,
        );
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_cors_rejection_is_forbidden() {
        assert_eq!(ApiError::CorsRejected.into_response().status(), StatusCode::FORBIDDEN);
    }
}
