//! Handler for the sidebar navigation tree.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use regelwerk_core::navigation::{build_tree, ExpansionState, NavTree, Route};
use regelwerk_core::types::DbId;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::NavigationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    #[serde(flatten)]
    pub tree: NavTree,
    /// Expansion state after revealing the active page, for the client to keep.
    pub expanded: Vec<DbId>,
}

/// GET /api/v1/navigation?expanded=&active=
pub async fn navigation_tree(
    State(state): State<AppState>,
    Query(params): Query<NavigationParams>,
) -> AppResult<impl IntoResponse> {
    let mut expansion = parse_expanded(params.expanded.as_deref())?;

    let active = match params.active.as_deref().filter(|p| !p.is_empty()) {
        Some(path) => Some(
            Route::parse(path).ok_or_else(|| AppError::BadRequest(format!("Unknown path '{path}'")))?,
        ),
        None => None,
    };

    let snapshot = state.snapshot().await?;
    if let Some(route) = &active {
        expansion.reveal(route, &snapshot);
    }

    let tree = build_tree(&snapshot, &expansion, active.as_ref());

    Ok(Json(DataResponse {
        data: NavigationResponse {
            tree,
            expanded: expansion.ids().collect(),
        },
    }))
}

/// Parse a comma-separated id list. Empty items are skipped.
fn parse_expanded(raw: Option<&str>) -> AppResult<ExpansionState> {
    let mut state = ExpansionState::new();
    for item in raw.unwrap_or_default().split(',').map(str::trim) {
        if item.is_empty() {
            continue;
        }
        let id: DbId = item
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Invalid category id '{item}'")))?;
        state.expand(id);
    }
    Ok(state)
}
