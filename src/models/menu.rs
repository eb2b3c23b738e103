use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A menu item. Price and category are free text by design — the menu is
/// marketing copy, not an order system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub available: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One category group, computed at read time (grouping is never stored).
#[derive(Debug, Serialize)]
pub struct MenuCategory {
    pub category: String,
    pub items: Vec<MenuItem>,
}

/// Body for POST /menu.
#[derive(Debug, Deserialize)]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub available: Option<bool>,
    pub image_url: Option<String>,
}

/// Body for PUT /menu/{id} — absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub available: Option<bool>,
    pub image_url: Option<String>,
}

/// Query params for GET /menu.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    /// Return items grouped by category instead of a flat list.
    #[serde(default)]
    pub grouped: Option<u8>,
}
