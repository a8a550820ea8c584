//! # Request Validation
//!
//! Each route declares an ordered list of [`Rule`]s. A rule names where the
//! value lives (path parameter or JSON body field), a predicate and the
//! message reported when the predicate fails. All rules of a route are
//! evaluated, failures are collected in order, and the [`Validated`]
//! extractor acts as the gate: a non-empty list short-circuits the request
//! with `400 { "errors": [...] }` before the handler runs.
//!
//! Predicates work on the loosely typed JSON value, so a price sent as
//! `"12"` is numeric while `"hola"` is not, and a missing field fails every
//! rule that targets it.

use std::collections::HashMap;
use std::marker::PhantomData;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Path, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    RequestExt,
};
use serde_json::{Map, Value};
use shared::{FieldError, FieldLocation};
use tracing::debug;

use crate::io::rest::error::ApiError;

/// A single validation rule
#[derive(Clone, Copy)]
pub struct Rule {
    location: FieldLocation,
    field: &'static str,
    check: fn(Option<&Value>) -> bool,
    message: &'static str,
}

impl Rule {
    pub const fn param(field: &'static str, check: fn(Option<&Value>) -> bool, message: &'static str) -> Self {
        Self {
            location: FieldLocation::Params,
            field,
            check,
            message,
        }
    }

    pub const fn body(field: &'static str, check: fn(Option<&Value>) -> bool, message: &'static str) -> Self {
        Self {
            location: FieldLocation::Body,
            field,
            check,
            message,
        }
    }

    fn evaluate(&self, params: &Map<String, Value>, body: &Value) -> Option<FieldError> {
        let value = match self.location {
            FieldLocation::Params => params.get(self.field),
            FieldLocation::Body => body.as_object().and_then(|fields| fields.get(self.field)),
        };

        if (self.check)(value) {
            None
        } else {
            Some(FieldError::new(self.location, self.field, value.cloned(), self.message))
        }
    }
}

/// Run every rule and collect the failures in rule order
pub fn evaluate(rules: &[Rule], params: &Map<String, Value>, body: &Value) -> Vec<FieldError> {
    rules
        .iter()
        .filter_map(|rule| rule.evaluate(params, body))
        .collect()
}

/// The rule list of a route, named by a marker type so it can parameterise [`Validated`]
pub trait RuleSet: Send + 'static {
    const RULES: &'static [Rule];
}

const INVALID_ID: &str = "Invalid ID";
const INVALID_NAME: &str = "You must enter a valid name";
const INVALID_PRICE: &str = "You must enter a valid price";
const MISSING_PRICE: &str = "You must enter price";
const INVALID_AVAILABILITY: &str = "Value not valid";

/// `id` path parameter of read, toggle and delete
pub struct ProductIdRules;

impl RuleSet for ProductIdRules {
    const RULES: &'static [Rule] = &[Rule::param("id", is_int, INVALID_ID)];
}

/// Body of `POST /api/products`
pub struct CreateProductRules;

impl RuleSet for CreateProductRules {
    const RULES: &'static [Rule] = &[
        Rule::body("name", is_not_empty, INVALID_NAME),
        Rule::body("price", is_numeric, INVALID_PRICE),
        Rule::body("price", is_not_empty, MISSING_PRICE),
        Rule::body("price", is_positive, INVALID_PRICE),
    ];
}

/// Path and body of `PUT /api/products/:id`
pub struct UpdateProductRules;

impl RuleSet for UpdateProductRules {
    const RULES: &'static [Rule] = &[
        Rule::param("id", is_int, INVALID_ID),
        Rule::body("name", is_not_empty, INVALID_NAME),
        Rule::body("price", is_numeric, INVALID_PRICE),
        Rule::body("price", is_not_empty, MISSING_PRICE),
        Rule::body("price", is_positive, INVALID_PRICE),
        Rule::body("availability", is_boolean, INVALID_AVAILABILITY),
    ];
}

/// Text form of a value; absent and `null` read as empty, arrays and objects have none
pub fn text_form(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    }
}

/// Loose numeric reading of a value; `NaN` when it has none
pub fn loose_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(text)) => string_number(text),
        Some(Value::Bool(true)) => 1.0,
        Some(Value::Bool(false)) | Some(Value::Null) => 0.0,
        None | Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

/// Numeric reading of text: blank is zero, `0x`/`0o`/`0b` prefixes and
/// signed `Infinity` are accepted, anything else must be a decimal literal.
fn string_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return radix_number(&text[2..], radix);
    }

    match strip_sign(text) {
        "Infinity" if text.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ if text.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) => {
            text.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

fn radix_number(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }

    digits
        .chars()
        .try_fold(0.0, |acc: f64, c| c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d)))
        .unwrap_or(f64::NAN)
}

/// Boolean reading of a value that passed [`is_boolean`]
pub fn boolean_value(value: Option<&Value>) -> Option<bool> {
    match text_form(value)?.as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn strip_sign(text: &str) -> &str {
    text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text)
}

fn all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Optional sign followed by digits
pub fn is_int(value: Option<&Value>) -> bool {
    text_form(value).is_some_and(|text| all_digits(strip_sign(&text)))
}

pub fn is_not_empty(value: Option<&Value>) -> bool {
    text_form(value).is_some_and(|text| !text.is_empty())
}

/// Optional sign, optional integer part and dot, then digits
pub fn is_numeric(value: Option<&Value>) -> bool {
    text_form(value).is_some_and(|text| {
        let unsigned = strip_sign(&text);
        match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole.is_empty() || all_digits(whole)) && all_digits(fraction),
            None => all_digits(unsigned),
        }
    })
}

pub fn is_positive(value: Option<&Value>) -> bool {
    loose_number(value) > 0.0
}

pub fn is_boolean(value: Option<&Value>) -> bool {
    boolean_value(value).is_some()
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok()) else {
        return false;
    };

    let mime = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Read the request body as loose JSON.
///
/// Bodies that are empty or not declared as JSON read as `{}`.
pub fn parse_body(headers: &HeaderMap, bytes: &[u8]) -> Result<Value, ApiError> {
    if !is_json_content_type(headers) || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(bytes).map_err(|e| {
        debug!("Rejecting malformed JSON body: {}", e);
        ApiError::Rejected(axum::http::StatusCode::BAD_REQUEST, e.to_string())
    })
}

/// Extractor running the rule set `R` against the path parameters and JSON body.
///
/// Handlers only run once every rule has passed.
pub struct Validated<R> {
    pub params: Map<String, Value>,
    pub body: Value,
    rules: PhantomData<R>,
}

impl<R> Validated<R> {
    /// A path parameter as captured from the URL
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(Value::as_str)
    }

    /// A field of the JSON body
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.as_object().and_then(|fields| fields.get(name))
    }
}

#[async_trait]
impl<S, R> FromRequest<S> for Validated<R>
where
    S: Send + Sync,
    R: RuleSet,
{
    type Rejection = ApiError;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let params: Map<String, Value> = req
            .extract_parts::<Path<HashMap<String, String>>>()
            .await
            .map(|Path(params)| params.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
            .unwrap_or_default();

        let headers = req.headers().clone();
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Rejected(rejection.status(), rejection.body_text()))?;
        let body = parse_body(&headers, &bytes)?;

        let errors = evaluate(R::RULES, &params, &body);
        if !errors.is_empty() {
            debug!("Request failed validation with {} error(s)", errors.len());
            return Err(ApiError::Validation(errors));
        }

        Ok(Self {
            params,
            body,
            rules: PhantomData,
        })
    }
}
