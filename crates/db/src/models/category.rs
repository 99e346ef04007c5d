//! Category rows and DTOs.

use regelwerk_core::content::{Category, CategoryKind};
use regelwerk_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `categories` table. `kind` is stored as text.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: DbId,
    pub title: String,
    pub icon: String,
    pub order_position: i32,
    pub parent_id: Option<DbId>,
    pub kind: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<CategoryRow> for Category {
    type Error = sqlx::Error;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        let kind: CategoryKind = row
            .kind
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Category {
            id: row.id,
            title: row.title,
            icon: row.icon,
            order_position: row.order_position,
            parent_id: row.parent_id,
            kind,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// DTO for creating a category. Omit `parent_id` for a main category.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub title: String,
    pub icon: Option<String>,
    pub parent_id: Option<DbId>,
    pub kind: Option<CategoryKind>,
}

/// DTO for editing a category. Absent fields keep their value; an explicit
/// `parent_id: null` promotes a rulebook to a main category.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategory {
    pub title: Option<String>,
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub parent_id: Option<Option<DbId>>,
    pub kind: Option<CategoryKind>,
}

/// Distinguish an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
