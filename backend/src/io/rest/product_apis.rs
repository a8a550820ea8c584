//! # REST API for Product Management
//!
//! Routes mounted under `/api/products`. Every route runs its validation
//! rules through the [`Validated`] extractor before the handler, and every
//! handler performs one product service call.
//!
//! Unknown products answer `400` on read but `404` on update, toggle and
//! delete; clients depend on both.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::DataResponse;
use tracing::info;

use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::product_mapper::ProductMapper;
use crate::io::rest::validation::{CreateProductRules, ProductIdRules, UpdateProductRules, Validated};
use crate::AppState;

pub const PRODUCT_DELETED: &str = "The product has been eliminated";

/// Create a router for product related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product_by_id)
                .put(update_product)
                .patch(update_availability)
                .delete(delete_product),
        )
}

/// Parse the validated `id` parameter.
///
/// An id that is well-formed but out of range cannot name a product.
fn product_id<R>(request: &Validated<R>, not_found: StatusCode) -> Result<i64, ApiError> {
    request
        .param("id")
        .and_then(|id| id.parse::<i64>().ok())
        .ok_or(ApiError::ProductNotFound(not_found))
}

/// List all products, most expensive first
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/products");

    let products = state.product_service.list_products().await?;
    let data: Vec<_> = products.into_iter().map(ProductMapper::to_summary_dto).collect();

    Ok((StatusCode::OK, Json(DataResponse::new(data))))
}

/// Get a single product
pub async fn get_product_by_id(
    State(state): State<AppState>,
    request: Validated<ProductIdRules>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/products/{}", request.param("id").unwrap_or_default());

    let id = product_id(&request, StatusCode::BAD_REQUEST)?;
    let product = state
        .product_service
        .get_product(id)
        .await
        .map_err(|e| ApiError::from_product_error(e, StatusCode::BAD_REQUEST))?;

    Ok((StatusCode::OK, Json(DataResponse::new(ProductMapper::to_summary_dto(product)))))
}

/// Create a new product
pub async fn create_product(
    State(state): State<AppState>,
    request: Validated<CreateProductRules>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/products - body: {}", request.body);

    let command = ProductMapper::to_create_command(&request);
    let product = state.product_service.create_product(command).await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(ProductMapper::to_dto(product)))))
}

/// Replace name, price and availability of a product
pub async fn update_product(
    State(state): State<AppState>,
    request: Validated<UpdateProductRules>,
) -> Result<impl IntoResponse, ApiError> {
    info!(
        "PUT /api/products/{} - body: {}",
        request.param("id").unwrap_or_default(),
        request.body
    );

    let id = product_id(&request, StatusCode::NOT_FOUND)?;
    let command = ProductMapper::to_update_command(id, &request);
    let product = state.product_service.update_product(command).await?;

    Ok((StatusCode::OK, Json(DataResponse::new(ProductMapper::to_dto(product)))))
}

/// Flip the availability of a product
pub async fn update_availability(
    State(state): State<AppState>,
    request: Validated<ProductIdRules>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PATCH /api/products/{}", request.param("id").unwrap_or_default());

    let id = product_id(&request, StatusCode::NOT_FOUND)?;
    let product = state.product_service.toggle_availability(id).await?;

    Ok((StatusCode::OK, Json(DataResponse::new(ProductMapper::to_dto(product)))))
}

/// Permanently delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    request: Validated<ProductIdRules>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/products/{}", request.param("id").unwrap_or_default());

    let id = product_id(&request, StatusCode::NOT_FOUND)?;
    state.product_service.delete_product(id).await?;

    Ok((StatusCode::OK, Json(DataResponse::new(PRODUCT_DELETED))))
}
