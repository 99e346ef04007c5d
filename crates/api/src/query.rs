//! Query parameter types shared by the public and admin handlers.

use regelwerk_core::types::DbId;
use serde::Deserialize;

/// `GET /navigation?expanded=<id,id,..>&active=<path>`.
///
/// `expanded` is a comma-separated list of main-category ids. `active` is a
/// site path such as `/rulebook/<id>`; its parent category is expanded too.
#[derive(Debug, Default, Deserialize)]
pub struct NavigationParams {
    pub expanded: Option<String>,
    pub active: Option<String>,
}

/// `GET /search?q=`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// `GET /highlight?text=&q=`.
#[derive(Debug, Deserialize)]
pub struct HighlightParams {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub q: String,
}

/// `GET /views/rulebook/{key}?highlight=&rule=`.
#[derive(Debug, Default, Deserialize)]
pub struct RulebookViewParams {
    pub highlight: Option<String>,
    pub rule: Option<DbId>,
}

/// `DELETE /admin/categories/{id}?policy=restrict|cascade|orphan`.
///
/// Parsed with `DeletePolicy::from_str` so an unknown policy produces the
/// usual JSON validation error.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    pub policy: Option<String>,
}
