pub mod admin;
pub mod auth;
pub mod content;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/session                        current session (requires auth)
///
/// /categories                          all categories (public)
/// /rules                               all rules (public)
/// /factions                            all factions (public)
/// /navigation                          sidebar tree (public)
/// /search                              free-text search (public)
/// /highlight                           split text by query (public)
/// /views/category/{key}                category page (public)
/// /views/rulebook/{key}                rulebook page (public)
/// /views/factions/{id}                 faction gallery page (public)
///
/// /admin/categories                    create (admin only)
/// /admin/categories/{id}               update, delete
/// /admin/categories/{id}/move          move up/down
/// /admin/categories/seed-factions      create the faction galleries
/// /admin/rules                         create
/// /admin/rules/{id}                    update, delete
/// /admin/rules/{id}/move               move up/down
/// /admin/factions                      create
/// /admin/factions/{id}                 update, delete
/// /admin/factions/{id}/move            move up/down
/// /admin/orphans                       unreachable content report
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .merge(content::router())
}
