//! Loading the three content collections together.

use regelwerk_core::content::ContentSnapshot;
use sqlx::PgPool;

use crate::repositories::{CategoryRepo, FactionRepo, RuleRepo};

/// Read categories, rules and factions concurrently and join them.
///
/// Fails as a whole if any of the three reads fails.
pub async fn load_snapshot(pool: &PgPool) -> Result<ContentSnapshot, sqlx::Error> {
    let (categories, rules, factions) = tokio::try_join!(
        CategoryRepo::list(pool),
        RuleRepo::list(pool),
        FactionRepo::list(pool),
    )?;

    tracing::debug!(
        categories = categories.len(),
        rules = rules.len(),
        factions = factions.len(),
        "Loaded content snapshot"
    );

    Ok(ContentSnapshot::new(categories, rules, factions))
}
