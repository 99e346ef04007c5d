//! Repository for the `factions` table.

use regelwerk_core::content::Faction;
use regelwerk_core::types::DbId;
use sqlx::{PgPool, Postgres};

use crate::models::faction::FactionRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, category_id, name, image_url, discord_url, order_position, created_at, updated_at";

/// Provides reads, upserts and deletes for factions.
pub struct FactionRepo;

impl FactionRepo {
    /// All factions in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Faction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM factions \
             ORDER BY order_position ASC, created_at ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, FactionRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Faction::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Faction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM factions WHERE id = $1");
        let row = sqlx::query_as::<_, FactionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Faction::from))
    }

    /// Insert the faction, or overwrite the row with the same id.
    pub async fn upsert(pool: &PgPool, faction: &Faction) -> Result<Faction, sqlx::Error> {
        Self::upsert_with(pool, faction).await
    }

    /// Upsert a whole sibling group in one transaction.
    pub async fn save_all(pool: &PgPool, factions: &[Faction]) -> Result<Vec<Faction>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut saved = Vec::with_capacity(factions.len());
        for faction in factions {
            saved.push(Self::upsert_with(&mut *tx, faction).await?);
        }
        tx.commit().await?;
        Ok(saved)
    }

    /// Delete a faction. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM factions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn upsert_with<'e, E>(executor: E, faction: &Faction) -> Result<Faction, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO factions (id, category_id, name, image_url, discord_url, order_position)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET
                category_id = EXCLUDED.category_id,
                name = EXCLUDED.name,
                image_url = EXCLUDED.image_url,
                discord_url = EXCLUDED.discord_url,
                order_position = EXCLUDED.order_position
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, FactionRow>(&query)
            .bind(faction.id)
            .bind(faction.category_id)
            .bind(&faction.name)
            .bind(&faction.image_url)
            .bind(&faction.discord_url)
            .bind(faction.order_position)
            .fetch_one(executor)
            .await?;
        Ok(row.into())
    }
}
