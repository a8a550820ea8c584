//! Conversions between the REST representation of products and the domain.

use chrono::SecondsFormat;
use serde_json::Value;
use shared::Product as ProductDto;

use crate::domain::commands::{CreateProductCommand, UpdateProductCommand};
use crate::domain::models::product::Product;
use crate::io::rest::validation::{boolean_value, loose_number, text_form, Validated};

/// Mapper to convert between shared Product DTOs and domain Products.
pub struct ProductMapper;

impl ProductMapper {
    /// Full representation, timestamps included
    pub fn to_dto(domain: Product) -> ProductDto {
        ProductDto {
            id: domain.id,
            name: domain.name,
            price: domain.price,
            availability: domain.availability,
            created_at: Some(domain.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            updated_at: Some(domain.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// Representation used by list and read, without timestamps
    pub fn to_summary_dto(domain: Product) -> ProductDto {
        ProductDto {
            id: domain.id,
            name: domain.name,
            price: domain.price,
            availability: domain.availability,
            created_at: None,
            updated_at: None,
        }
    }

    /// Build the create command from a body that passed the create rules
    pub fn to_create_command<R>(request: &Validated<R>) -> CreateProductCommand {
        CreateProductCommand {
            name: Self::name(request.field("name")),
            price: loose_number(request.field("price")),
        }
    }

    /// Build the update command from a request that passed the update rules
    pub fn to_update_command<R>(id: i64, request: &Validated<R>) -> UpdateProductCommand {
        UpdateProductCommand {
            id,
            name: Self::name(request.field("name")),
            price: loose_number(request.field("price")),
            availability: boolean_value(request.field("availability")).unwrap_or(true),
        }
    }

    fn name(value: Option<&Value>) -> String {
        text_form(value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn domain_product() -> Product {
        Product {
            id: 3,
            name: "Curved monitor".to_string(),
            price: 300.0,
            availability: true,
            created_at: Utc.with_ymd_and_hms(2024, 6, 14, 10, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_to_dto_includes_timestamps() {
        let dto = ProductMapper::to_dto(domain_product());

        assert_eq!(dto.id, 3);
        assert_eq!(dto.created_at.as_deref(), Some("2024-06-14T10:30:00.000Z"));
        assert_eq!(dto.updated_at.as_deref(), Some("2024-06-15T08:00:00.000Z"));
    }

    #[test]
    fn test_to_summary_dto_drops_timestamps() {
        let dto = ProductMapper::to_summary_dto(domain_product());

        assert_eq!(dto.name, "Curved monitor");
        assert_eq!(dto.price, 300.0);
        assert!(dto.created_at.is_none());
        assert!(dto.updated_at.is_none());
    }
}
