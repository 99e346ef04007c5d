//! Repository tests for categories, rules and factions.

use assert_matches::assert_matches;
use chrono::Utc;
use regelwerk_core::content::{Category, CategoryKind, Faction, Rule};
use regelwerk_core::integrity::{plan_category_delete, DeletePolicy};
use regelwerk_core::ordering::{move_item, sibling_rules, Direction, OrderStrategy};
use regelwerk_core::types::DbId;
use regelwerk_db::repositories::{CategoryRepo, FactionRepo, RuleRepo};
use regelwerk_db::snapshot::load_snapshot;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_category(title: &str, position: i32, parent_id: Option<DbId>) -> Category {
    let now = Utc::now();
    Category {
        id: DbId::new_v4(),
        title: title.to_string(),
        icon: "book".to_string(),
        order_position: position,
        parent_id,
        kind: CategoryKind::Standard,
        created_at: now,
        updated_at: now,
    }
}

fn new_rule(category_id: DbId, title: &str, position: i32) -> Rule {
    let now = Utc::now();
    Rule {
        id: DbId::new_v4(),
        category_id,
        title: title.to_string(),
        content: format!("<p>{title}</p>"),
        order_position: position,
        created_at: now,
        updated_at: now,
    }
}

fn new_faction(category_id: DbId, name: &str, position: i32) -> Faction {
    let now = Utc::now();
    Faction {
        id: DbId::new_v4(),
        category_id,
        name: name.to_string(),
        image_url: "https://img.example/f.png".to_string(),
        discord_url: "https://discord.gg/f".to_string(),
        order_position: position,
        created_at: now,
        updated_at: now,
    }
}

/// Main category "Allgemein" with rulebook "Verkehr" holding three rules.
async fn seed(pool: &PgPool) -> (Category, Category, Vec<Rule>) {
    let main = CategoryRepo::upsert(pool, &new_category("Allgemein", 1, None))
        .await
        .unwrap();
    let book = CategoryRepo::upsert(pool, &new_category("Verkehr", 1, Some(main.id)))
        .await
        .unwrap();
    let mut rules = Vec::new();
    for (i, title) in ["A", "B", "C"].into_iter().enumerate() {
        rules.push(
            RuleRepo::upsert(pool, &new_rule(book.id, title, i as i32))
                .await
                .unwrap(),
        );
    }
    (main, book, rules)
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_inserts_then_updates(pool: PgPool) {
    let mut category = new_category("Allgemein", 1, None);
    category.kind = CategoryKind::FactionGallery;

    let created = CategoryRepo::upsert(&pool, &category).await.unwrap();
    assert_eq!(created.id, category.id);
    assert_eq!(created.kind, CategoryKind::FactionGallery);

    let renamed = Category {
        title: "Regeln".to_string(),
        ..created.clone()
    };
    let updated = CategoryRepo::upsert(&pool, &renamed).await.unwrap();
    assert_eq!(updated.title, "Regeln");
    assert!(updated.updated_at >= created.updated_at);

    let found = CategoryRepo::find_by_id(&pool, category.id).await.unwrap();
    assert_eq!(found.map(|c| c.title), Some("Regeln".to_string()));
    assert_eq!(CategoryRepo::list(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lists_come_back_in_display_order(pool: PgPool) {
    let (_, book, _) = seed(&pool).await;
    FactionRepo::upsert(&pool, &new_faction(book.id, "Zweite", 2))
        .await
        .unwrap();
    FactionRepo::upsert(&pool, &new_faction(book.id, "Erste", 1))
        .await
        .unwrap();

    let snapshot = load_snapshot(&pool).await.unwrap();
    let titles: Vec<_> = snapshot.rules.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["A", "B", "C"]);
    let names: Vec<_> = snapshot.factions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Erste", "Zweite"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_rule_and_faction(pool: PgPool) {
    let (_, book, rules) = seed(&pool).await;
    let faction = FactionRepo::upsert(&pool, &new_faction(book.id, "Polizei", 1))
        .await
        .unwrap();

    assert!(RuleRepo::delete(&pool, rules[0].id).await.unwrap());
    assert!(!RuleRepo::delete(&pool, rules[0].id).await.unwrap());
    assert!(RuleRepo::find_by_id(&pool, rules[0].id).await.unwrap().is_none());

    assert!(FactionRepo::delete(&pool, faction.id).await.unwrap());
    assert!(FactionRepo::find_by_id(&pool, faction.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_kind_fails_to_decode(pool: PgPool) {
    sqlx::query("ALTER TABLE categories DROP CONSTRAINT ck_categories_kind")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO categories (title, kind) VALUES ('X', 'gallery')")
        .execute(&pool)
        .await
        .unwrap();

    assert_matches!(CategoryRepo::list(&pool).await, Err(sqlx::Error::Decode(_)));
}

// ---------------------------------------------------------------------------
// Ordering persistence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_all_persists_renumbered_group(pool: PgPool) {
    let (_, book, rules) = seed(&pool).await;
    let snapshot = load_snapshot(&pool).await.unwrap();

    let mut siblings = sibling_rules(&snapshot, book.id);
    move_item(&mut siblings, rules[1].id, Direction::Up, OrderStrategy::Renumber).unwrap();
    RuleRepo::save_all(&pool, &siblings).await.unwrap();

    let after = load_snapshot(&pool).await.unwrap();
    let order: Vec<_> = after
        .rules
        .iter()
        .map(|r| (r.title.as_str(), r.order_position))
        .collect();
    assert_eq!(order, [("B", 0), ("A", 1), ("C", 2)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_all_is_atomic(pool: PgPool) {
    let (_, _, rules) = seed(&pool).await;

    let mut first = rules[0].clone();
    first.order_position = 99;
    // Make the second row of the batch fail.
    sqlx::query("ALTER TABLE rules ADD CONSTRAINT ck_test_title CHECK (title <> 'broken')")
        .execute(&pool)
        .await
        .unwrap();
    let mut broken = rules[1].clone();
    broken.title = "broken".to_string();

    let result = RuleRepo::save_all(&pool, &[first, broken]).await;
    assert!(result.is_err());

    let stored = RuleRepo::find_by_id(&pool, rules[0].id).await.unwrap().unwrap();
    assert_eq!(stored.order_position, rules[0].order_position);
}

// ---------------------------------------------------------------------------
// Delete plans
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cascade_plan_removes_subtree(pool: PgPool) {
    let (main, book, _) = seed(&pool).await;
    FactionRepo::upsert(&pool, &new_faction(book.id, "Polizei", 1))
        .await
        .unwrap();
    let other = CategoryRepo::upsert(&pool, &new_category("Sonstiges", 2, None))
        .await
        .unwrap();

    let snapshot = load_snapshot(&pool).await.unwrap();
    let plan = plan_category_delete(&snapshot, main.id, DeletePolicy::Cascade).unwrap();
    let deleted = CategoryRepo::delete_plan(&pool, &plan).await.unwrap();

    assert_eq!(deleted.categories, 2);
    assert_eq!(deleted.rules, 3);
    assert_eq!(deleted.factions, 1);

    let after = load_snapshot(&pool).await.unwrap();
    assert_eq!(after.categories.iter().map(|c| c.id).collect::<Vec<_>>(), vec![other.id]);
    assert!(after.rules.is_empty());
    assert!(after.factions.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_orphan_plan_keeps_rules(pool: PgPool) {
    let (_, book, _) = seed(&pool).await;

    let snapshot = load_snapshot(&pool).await.unwrap();
    let plan = plan_category_delete(&snapshot, book.id, DeletePolicy::Orphan).unwrap();
    let deleted = CategoryRepo::delete_plan(&pool, &plan).await.unwrap();
    assert_eq!(deleted.categories, 1);
    assert_eq!(deleted.rules, 0);

    let after = load_snapshot(&pool).await.unwrap();
    assert_eq!(after.rules.len(), 3);
    assert!(after.rules.iter().all(|r| after.rulebook(r.category_id).is_none()));
}
