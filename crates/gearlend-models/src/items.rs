//! Lendable inventory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// An item row. `quantity` is the number of units still on the shelf.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Item {
    pub id: i64,
    pub name: String,
    /// Stored image handle
    pub image: Option<String>,
    pub quantity: i64,
    pub available: bool,
    pub teacher_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item as returned by the API, with the public image URL resolved.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    #[schema(example = "/static/images/3f2a..._projector.png")]
    pub image_url: Option<String>,
    pub quantity: i64,
    pub available: bool,
    pub teacher_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemResponse {
    pub fn new(item: Item, image_url: Option<String>) -> Self {
        Self {
            id: item.id,
            name: item.name,
            image: item.image,
            image_url,
            quantity: item.quantity,
            available: item.available,
            teacher_id: item.teacher_id,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Fields of the multipart item creation form, once parsed.
#[derive(Debug, Clone, Validate)]
pub struct CreateItemDto {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "Quantity must be 0 or more"))]
    pub quantity: i64,
    pub available: bool,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateItemDto {
    #[validate(length(min = 1, message = "Item name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Quantity must be 0 or more"))]
    pub quantity: Option<i64>,
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemFilter {
    #[default]
    All,
    /// Only items that can currently be borrowed
    Available,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ItemListParams {
    pub filter: Option<ItemFilter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, available: bool) -> Item {
        Item {
            id: 1,
            name: "Projector".to_string(),
            image: None,
            quantity,
            available,
            teacher_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_response_carries_resolved_url() {
        let mut stored = item(3, true);
        stored.image = Some("abc_projector.png".to_string());

        let response = ItemResponse::new(stored, Some("/static/images/abc_projector.png".into()));
        assert_eq!(response.image.as_deref(), Some("abc_projector.png"));
        assert_eq!(
            response.image_url.as_deref(),
            Some("/static/images/abc_projector.png")
        );
        assert_eq!(response.quantity, 3);
        assert!(response.available);
    }

    #[test]
    fn test_create_item_dto_rejects_negative_quantity() {
        let dto = CreateItemDto {
            name: "Cable".to_string(),
            quantity: -1,
            available: true,
        };
        assert!(dto.validate().unwrap_err().field_errors().contains_key("quantity"));

        let dto = CreateItemDto { quantity: 0, ..dto };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_item_dto_requires_name() {
        let dto = CreateItemDto {
            name: String::new(),
            quantity: 1,
            available: true,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_item_filter_deserialize() {
        let params: ItemFilter = serde_json::from_str(r#""available""#).unwrap();
        assert_eq!(params, ItemFilter::Available);
        assert_eq!(ItemFilter::default(), ItemFilter::All);
    }
}
