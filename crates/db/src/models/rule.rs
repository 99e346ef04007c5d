//! Rule rows and DTOs.

use regelwerk_core::content::Rule;
use regelwerk_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `rules` table.
#[derive(Debug, Clone, FromRow)]
pub struct RuleRow {
    pub id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub content: String,
    pub order_position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<RuleRow> for Rule {
    fn from(row: RuleRow) -> Self {
        Rule {
            id: row.id,
            category_id: row.category_id,
            title: row.title,
            content: row.content,
            order_position: row.order_position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRule {
    /// The rulebook the rule belongs to.
    pub category_id: DbId,
    pub title: String,
    /// HTML markup from the editor.
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRule {
    pub category_id: Option<DbId>,
    pub title: Option<String>,
    pub content: Option<String>,
}
