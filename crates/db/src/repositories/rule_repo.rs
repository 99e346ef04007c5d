//! Repository for the `rules` table.

use regelwerk_core::content::Rule;
use regelwerk_core::types::DbId;
use sqlx::{PgPool, Postgres};

use crate::models::rule::RuleRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, title, content, order_position, created_at, updated_at";

/// Provides reads, upserts and deletes for rules.
pub struct RuleRepo;

impl RuleRepo {
    /// All rules in display order, across every rulebook.
    pub async fn list(pool: &PgPool) -> Result<Vec<Rule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rules \
             ORDER BY order_position ASC, created_at ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, RuleRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Rule::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Rule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rules WHERE id = $1");
        let row = sqlx::query_as::<_, RuleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Rule::from))
    }

    /// Insert the rule, or overwrite the row with the same id.
    pub async fn upsert(pool: &PgPool, rule: &Rule) -> Result<Rule, sqlx::Error> {
        Self::upsert_with(pool, rule).await
    }

    /// Upsert a whole sibling group in one transaction.
    pub async fn save_all(pool: &PgPool, rules: &[Rule]) -> Result<Vec<Rule>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut saved = Vec::with_capacity(rules.len());
        for rule in rules {
            saved.push(Self::upsert_with(&mut *tx, rule).await?);
        }
        tx.commit().await?;
        Ok(saved)
    }

    /// Delete a rule. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn upsert_with<'e, E>(executor: E, rule: &Rule) -> Result<Rule, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO rules (id, category_id, title, content, order_position)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                category_id = EXCLUDED.category_id,
                title = EXCLUDED.title,
                content = EXCLUDED.content,
                order_position = EXCLUDED.order_position
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, RuleRow>(&query)
            .bind(rule.id)
            .bind(rule.category_id)
            .bind(&rule.title)
            .bind(&rule.content)
            .bind(rule.order_position)
            .fetch_one(executor)
            .await?;
        Ok(row.into())
    }
}
