//! Public read routes. Everything here is served from the content snapshot.

use axum::routing::get;
use axum::Router;

use crate::handlers::{content, navigation, search, views};
use crate::state::AppState;

/// ```text
/// GET /categories                  -> list_categories
/// GET /rules                       -> list_rules
/// GET /factions                    -> list_factions
/// GET /navigation                  -> navigation_tree
/// GET /search                      -> search
/// GET /highlight                   -> highlight
/// GET /views/category/{key}        -> category_view
/// GET /views/rulebook/{key}        -> rulebook_view
/// GET /views/factions/{id}         -> faction_view
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(content::list_categories))
        .route("/rules", get(content::list_rules))
        .route("/factions", get(content::list_factions))
        .route("/navigation", get(navigation::navigation_tree))
        .route("/search", get(search::search))
        .route("/highlight", get(search::highlight))
        .route("/views/category/{key}", get(views::category_view))
        .route("/views/rulebook/{key}", get(views::rulebook_view))
        .route("/views/factions/{id}", get(views::faction_view))
}
