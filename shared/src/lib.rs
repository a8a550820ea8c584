use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Product as it travels over the REST API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
    /// Creation time (RFC 3339). Omitted from list and read responses.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last modification time (RFC 3339). Omitted from list and read responses.
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Success envelope: `{ "data": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Single-message failure envelope: `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Where a validated value was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    /// Path parameter, e.g. the `id` in `/api/products/:id`
    Params,
    /// Field of the JSON request body
    Body,
}

/// One failed validation rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Always `"field"`
    #[serde(rename = "type")]
    pub kind: String,
    /// The offending value, absent when the field was missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: FieldLocation,
}

impl FieldError {
    pub fn new(location: FieldLocation, path: &str, value: Option<Value>, msg: &str) -> Self {
        Self {
            kind: "field".to_string(),
            value,
            msg: msg.to_string(),
            path: path.to_string(),
            location,
        }
    }
}

/// Validation failure envelope: `{ "errors": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}
