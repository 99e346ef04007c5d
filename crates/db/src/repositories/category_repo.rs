//! Repository for the `categories` table.

use regelwerk_core::content::Category;
use regelwerk_core::integrity::DeletePlan;
use regelwerk_core::types::DbId;
use sqlx::{PgPool, Postgres};

use crate::models::category::CategoryRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, icon, order_position, parent_id, kind, created_at, updated_at";

/// Rows removed by a [`DeletePlan`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletedCounts {
    pub categories: u64,
    pub rules: u64,
    pub factions: u64,
}

/// Provides reads, upserts and planned deletes for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// All categories in display order.
    ///
    /// Ties on `order_position` fall back to creation time, then id, so the
    /// order is stable between reads.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories \
             ORDER BY order_position ASC, created_at ASC, id ASC"
        );
        sqlx::query_as::<_, CategoryRow>(&query)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(Category::try_from)
            .collect()
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(Category::try_from)
            .transpose()
    }

    /// Insert the category, or overwrite the row with the same id.
    pub async fn upsert(pool: &PgPool, category: &Category) -> Result<Category, sqlx::Error> {
        Self::upsert_with(pool, category).await
    }

    /// Upsert a whole sibling group atomically.
    ///
    /// Either every row is written or none is.
    pub async fn save_all(
        pool: &PgPool,
        categories: &[Category],
    ) -> Result<Vec<Category>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut saved = Vec::with_capacity(categories.len());
        for category in categories {
            saved.push(Self::upsert_with(&mut *tx, category).await?);
        }
        tx.commit().await?;
        Ok(saved)
    }

    /// Execute a delete plan in one transaction.
    pub async fn delete_plan(pool: &PgPool, plan: &DeletePlan) -> Result<DeletedCounts, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let rules = sqlx::query("DELETE FROM rules WHERE id = ANY($1)")
            .bind(&plan.rule_ids)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let factions = sqlx::query("DELETE FROM factions WHERE id = ANY($1)")
            .bind(&plan.faction_ids)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let categories = sqlx::query("DELETE FROM categories WHERE id = ANY($1)")
            .bind(&plan.category_ids)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(DeletedCounts {
            categories,
            rules,
            factions,
        })
    }

    async fn upsert_with<'e, E>(executor: E, category: &Category) -> Result<Category, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO categories (id, title, icon, order_position, parent_id, kind)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                icon = EXCLUDED.icon,
                order_position = EXCLUDED.order_position,
                parent_id = EXCLUDED.parent_id,
                kind = EXCLUDED.kind
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(category.id)
            .bind(&category.title)
            .bind(&category.icon)
            .bind(category.order_position)
            .bind(category.parent_id)
            .bind(category.kind.as_str())
            .fetch_one(executor)
            .await?
            .try_into()
    }
}
