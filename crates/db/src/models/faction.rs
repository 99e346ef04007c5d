//! Faction rows and DTOs.

use regelwerk_core::content::Faction;
use regelwerk_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `factions` table.
#[derive(Debug, Clone, FromRow)]
pub struct FactionRow {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub image_url: String,
    pub discord_url: String,
    pub order_position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<FactionRow> for Faction {
    fn from(row: FactionRow) -> Self {
        Faction {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            image_url: row.image_url,
            discord_url: row.discord_url,
            order_position: row.order_position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateFaction {
    pub category_id: DbId,
    pub name: String,
    pub image_url: String,
    pub discord_url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFaction {
    pub category_id: Option<DbId>,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub discord_url: Option<String>,
}
