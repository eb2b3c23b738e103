use sqlx::PgPool;
use uuid::Uuid;

use crate::models::menu::{
    CreateMenuItemRequest, MenuCategory, MenuItem, UpdateMenuItemRequest,
};

const MENU_COLS: &str =
    "id, name, description, price, category, available, image_url, created_at, updated_at";

/// Category label for items without one.
const UNCATEGORIZED: &str = "Other";

pub struct MenuService;

impl MenuService {
    pub async fn list(pool: &PgPool) -> anyhow::Result<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_COLS} FROM menu_items ORDER BY category NULLS LAST, name"
        ))
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    pub async fn list_grouped(pool: &PgPool) -> anyhow::Result<Vec<MenuCategory>> {
        Ok(group_by_category(Self::list(pool).await?))
    }

    pub async fn create(pool: &PgPool, req: &CreateMenuItemRequest) -> anyhow::Result<MenuItem> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            "INSERT INTO menu_items (name, description, price, category, available, image_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {MENU_COLS}"
        ))
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.price)
        .bind(&req.category)
        .bind(req.available.unwrap_or(true))
        .bind(&req.image_url)
        .fetch_one(pool)
        .await?;
        Ok(item)
    }

    /// Partial update: absent fields keep their stored value.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateMenuItemRequest,
    ) -> anyhow::Result<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            "UPDATE menu_items SET
                 name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 price = COALESCE($4, price),
                 category = COALESCE($5, category),
                 available = COALESCE($6, available),
                 image_url = COALESCE($7, image_url),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {MENU_COLS}"
        ))
        .bind(id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.price)
        .bind(&req.category)
        .bind(req.available)
        .bind(&req.image_url)
        .fetch_optional(pool)
        .await?;
        Ok(item)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Group items by category, preserving their incoming order (the list
/// query already sorts by category then name). Computed at read time —
/// grouping is presentation, not storage. Groups are matched by name, so
/// uncategorized items land in an existing "Other" category rather than a
/// duplicate group.
pub fn group_by_category(items: Vec<MenuItem>) -> Vec<MenuCategory> {
    let mut groups: Vec<MenuCategory> = Vec::new();
    for item in items {
        let category = item.category.clone().unwrap_or_else(|| UNCATEGORIZED.to_string());
        match groups.iter_mut().find(|group| group.category == category) {
            Some(group) => group.items.push(item),
            None => groups.push(MenuCategory {
                category,
                items: vec![item],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(name: &str, category: Option<&str>) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price: Some("$12.99".to_string()),
            category: category.map(String::from),
            available: true,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_grouping_preserves_order() {
        let groups = group_by_category(vec![
            item("BBQ Wings", Some("Wings")),
            item("Hot Wings", Some("Wings")),
            item("Cajun Fries", Some("Loaded Fries")),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Wings");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[1].category, "Loaded Fries");
    }

    #[test]
    fn test_uncategorized_items_grouped_as_other() {
        let groups = group_by_category(vec![item("Sweet Tea", None)]);
        assert_eq!(groups[0].category, "Other");
    }

    #[test]
    fn test_literal_other_and_uncategorized_share_one_group() {
        // NULL categories sort last, so they arrive non-adjacent to a
        // literal "Other" category; both must land in the same group.
        let groups = group_by_category(vec![
            item("Funnel Cake Fries", Some("Other")),
            item("Hot Wings", Some("Wings")),
            item("Sweet Tea", None),
        ]);
        assert_eq!(groups.len(), 2);
        let other = groups.iter().find(|g| g.category == "Other").unwrap();
        assert_eq!(other.items.len(), 2);
    }

    #[test]
    fn test_empty_menu() {
        assert!(group_by_category(Vec::new()).is_empty());
    }
}
