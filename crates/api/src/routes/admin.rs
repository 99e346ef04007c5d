//! Content editing routes. Every handler requires an admin token.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{categories, factions, rules};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /categories                   -> create_category
/// POST   /categories/seed-factions     -> seed_factions
/// PUT    /categories/{id}              -> update_category
/// DELETE /categories/{id}?policy=      -> delete_category
/// POST   /categories/{id}/move         -> move_category
///
/// POST   /rules                        -> create_rule
/// PUT    /rules/{id}                   -> update_rule
/// DELETE /rules/{id}                   -> delete_rule
/// POST   /rules/{id}/move              -> move_rule
///
/// POST   /factions                     -> create_faction
/// PUT    /factions/{id}                -> update_faction
/// DELETE /factions/{id}                -> delete_faction
/// POST   /factions/{id}/move           -> move_faction
///
/// GET    /orphans                      -> list_orphans
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", post(categories::create_category))
        .route("/categories/seed-factions", post(categories::seed_factions))
        .route(
            "/categories/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route("/categories/{id}/move", post(categories::move_category))
        .route("/rules", post(rules::create_rule))
        .route(
            "/rules/{id}",
            put(rules::update_rule).delete(rules::delete_rule),
        )
        .route("/rules/{id}/move", post(rules::move_rule))
        .route("/factions", post(factions::create_faction))
        .route(
            "/factions/{id}",
            put(factions::update_faction).delete(factions::delete_faction),
        )
        .route("/factions/{id}/move", post(factions::move_faction))
        .route("/orphans", get(categories::list_orphans))
}
