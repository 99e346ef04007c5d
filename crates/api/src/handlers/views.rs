//! Page models for the category, rulebook and faction views.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use regelwerk_core::error::CoreError;
use regelwerk_core::types::DbId;
use regelwerk_core::views;

use crate::error::{AppError, AppResult};
use crate::query::RulebookViewParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/views/category/{key}
///
/// `key` is a category id or, for older links, its title.
pub async fn category_view(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.snapshot().await?;
    let view = views::category_view(&snapshot, &key).ok_or_else(|| not_found("Category", key))?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/views/rulebook/{key}?highlight=&rule=
pub async fn rulebook_view(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<RulebookViewParams>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.snapshot().await?;
    let view = views::rulebook_view(&snapshot, &key, params.highlight.as_deref(), params.rule)
        .ok_or_else(|| not_found("Rulebook", key))?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/views/factions/{id}
pub async fn faction_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.snapshot().await?;
    let view = views::faction_view(&snapshot, id).ok_or(AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    }))?;
    Ok(Json(DataResponse { data: view }))
}

fn not_found(entity: &'static str, key: String) -> AppError {
    AppError::Core(CoreError::NotFoundByKey { entity, key })
}
