use chrono::{DateTime, Utc};

/// A stored product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product that has not been stored yet; the store assigns its id
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
}

/// Full replacement of a product's editable fields
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub price: f64,
    pub availability: bool,
    pub updated_at: DateTime<Utc>,
}
