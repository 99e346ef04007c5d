//! Handlers for free-text search and query highlighting.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use regelwerk_core::highlight::segments;

use crate::error::AppResult;
use crate::query::{HighlightParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/search?q=
///
/// Case-insensitive substring search over categories, rulebooks, rules and
/// factions. A blank query returns an empty list.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.snapshot().await?;
    let results = regelwerk_core::search::search(&params.q, &snapshot);

    tracing::debug!(query = %params.q, hits = results.len(), "Search executed");

    Ok(Json(DataResponse { data: results }))
}

/// GET /api/v1/highlight?text=&q=
///
/// Split `text` into plain and highlighted segments.
pub async fn highlight(Query(params): Query<HighlightParams>) -> impl IntoResponse {
    Json(DataResponse {
        data: segments(&params.text, &params.q),
    })
}
