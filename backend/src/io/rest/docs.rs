//! # API Documentation
//!
//! `GET /docs` serves a Swagger UI page and `GET /docs/openapi.json` the
//! OpenAPI 3.0 document it renders. The document is built once per process.

use axum::{
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

pub const OPENAPI_PATH: &str = "/docs/openapi.json";

static OPENAPI_DOCUMENT: Lazy<Value> = Lazy::new(build_openapi_document);

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>REST API Rust Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
    <style>
      .swagger-ui .topbar { background-color: #DBDBDB; }
      .swagger-ui .topbar a { max-width: 90px !important; }
    </style>
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
    <script>
      window.onload = () => {
        window.ui = SwaggerUIBundle({
          url: "/docs/openapi.json",
          dom_id: "#swagger-ui",
        });
      };
    </script>
  </body>
</html>
"##;

/// Create a router for the documentation endpoints
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/docs", get(swagger_ui))
        .route(OPENAPI_PATH, get(openapi_json))
}

pub async fn swagger_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}

pub async fn openapi_json() -> impl IntoResponse {
    Json(&*OPENAPI_DOCUMENT)
}

fn id_parameter() -> Value {
    json!({
        "in": "path",
        "name": "id",
        "description": "The ID of the product to retrieve",
        "required": true,
        "schema": { "type": "integer" }
    })
}

fn product_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Product" }
            }
        }
    })
}

fn product_body(with_availability: bool) -> Value {
    let mut properties = json!({
        "name": { "type": "string", "example": "Curved Monitor 49" },
        "price": { "type": "number", "example": 399 }
    });
    if with_availability {
        properties["availability"] = json!({ "type": "boolean", "example": true });
    }

    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "type": "object", "properties": properties }
            }
        }
    })
}

fn build_openapi_document() -> Value {
    json!({
        "openapi": "3.0.2",
        "info": {
            "title": "REST API Rust / Axum",
            "version": "1.0.0",
            "description": "API Docs for Production"
        },
        "tags": [
            { "name": "Products", "description": "API operations related to products" }
        ],
        "paths": {
            "/api/products": {
                "get": {
                    "summary": "Get a list of products",
                    "tags": ["Products"],
                    "description": "Return a list of products",
                    "responses": {
                        "200": {
                            "description": "Successful response",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Product" }
                                    }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "summary": "Creates a new product",
                    "tags": ["Products"],
                    "description": "Returns a new record in the database",
                    "requestBody": product_body(false),
                    "responses": {
                        "201": product_response("Successful response"),
                        "400": { "description": "Bad request - Invalid input data" }
                    }
                }
            },
            "/api/products/{id}": {
                "get": {
                    "summary": "Get a product by ID",
                    "tags": ["Products"],
                    "description": "Return a product based on its unique ID",
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": product_response("Successful response"),
                        "400": { "description": "Bad Request - Invalid ID or product does not exist" }
                    }
                },
                "put": {
                    "summary": "Updates a product with user input",
                    "tags": ["Products"],
                    "description": "Returns the updated product",
                    "parameters": [id_parameter()],
                    "requestBody": product_body(true),
                    "responses": {
                        "200": product_response("Successful response"),
                        "400": { "description": "Bad request - Invalid input data or Invalid ID" },
                        "404": { "description": "Not found - Product does not exist" }
                    }
                },
                "patch": {
                    "summary": "Updates product availability",
                    "tags": ["Products"],
                    "description": "Returns the product with its availability flipped",
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": product_response("Successful response"),
                        "400": { "description": "Bad request - Invalid ID" },
                        "404": { "description": "Not found - Product does not exist" }
                    }
                },
                "delete": {
                    "summary": "Delete products",
                    "tags": ["Products"],
                    "description": "Delete a product from the database",
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": {
                            "description": "Deleted successfully",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "string",
                                        "example": "The product has been eliminated"
                                    }
                                }
                            }
                        },
                        "400": { "description": "Bad request - Invalid ID" },
                        "404": { "description": "Not found - Product does not exist" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Product": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "description": "The product ID", "example": 1 },
                        "name": { "type": "string", "description": "The product name", "example": "Curved monitor" },
                        "price": { "type": "number", "description": "The product price", "example": 300 },
                        "availability": { "type": "boolean", "description": "The product availability", "example": true }
                    }
                }
            }
        }
    })
}
