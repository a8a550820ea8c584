//! Inputs to the product service, already validated at the HTTP boundary.

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductCommand {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProductCommand {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
}
