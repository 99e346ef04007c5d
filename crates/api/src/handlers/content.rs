//! Full collections for clients that build their own pages.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.snapshot().await?;
    Ok(Json(DataResponse {
        data: snapshot.categories.clone(),
    }))
}

/// GET /api/v1/rules
pub async fn list_rules(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.snapshot().await?;
    Ok(Json(DataResponse {
        data: snapshot.rules.clone(),
    }))
}

/// GET /api/v1/factions
pub async fn list_factions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.snapshot().await?;
    Ok(Json(DataResponse {
        data: snapshot.factions.clone(),
    }))
}
