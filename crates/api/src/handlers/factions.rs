//! Admin handlers for factions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use regelwerk_core::content::{
    next_order_position, validate_faction_target, validate_title, validate_url, Faction,
};
use regelwerk_core::error::CoreError;
use regelwerk_core::ordering::{changed_positions, move_item, sibling_factions, FACTION_STRATEGY};
use regelwerk_core::types::DbId;
use regelwerk_db::models::faction::{CreateFaction, UpdateFaction};
use regelwerk_db::repositories::FactionRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::reorder::{MoveRequest, MoveResponse};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/factions
pub async fn create_faction(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateFaction>,
) -> AppResult<impl IntoResponse> {
    validate_title("Name", &input.name)?;
    validate_url("Image URL", &input.image_url)?;
    validate_url("Discord URL", &input.discord_url)?;

    let snapshot = state.snapshot().await?;
    validate_faction_target(&snapshot, input.category_id)?;

    let now = Utc::now();
    let faction = Faction {
        id: Uuid::now_v7(),
        category_id: input.category_id,
        name: input.name.trim().to_string(),
        image_url: input.image_url.trim().to_string(),
        discord_url: input.discord_url.trim().to_string(),
        order_position: next_order_position(
            snapshot
                .factions_of(input.category_id)
                .map(|f| f.order_position),
        ),
        created_at: now,
        updated_at: now,
    };

    let created = FactionRepo::upsert(&state.pool, &faction).await?;
    state.content_changed().await;

    tracing::info!(
        faction_id = %created.id,
        category_id = %created.category_id,
        admin_id = %admin.user_id,
        "Faction created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/admin/factions/{id}
pub async fn update_faction(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFaction>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_title("Name", name)?;
    }
    if let Some(url) = &input.image_url {
        validate_url("Image URL", url)?;
    }
    if let Some(url) = &input.discord_url {
        validate_url("Discord URL", url)?;
    }

    let snapshot = state.snapshot().await?;
    let existing = snapshot.faction(id).ok_or(AppError::Core(CoreError::NotFound {
        entity: "Faction",
        id,
    }))?;

    let mut faction = existing.clone();
    if let Some(name) = input.name {
        faction.name = name.trim().to_string();
    }
    if let Some(url) = input.image_url {
        faction.image_url = url.trim().to_string();
    }
    if let Some(url) = input.discord_url {
        faction.discord_url = url.trim().to_string();
    }
    if let Some(category_id) = input.category_id.filter(|c| *c != existing.category_id) {
        validate_faction_target(&snapshot, category_id)?;
        faction.category_id = category_id;
        faction.order_position =
            next_order_position(snapshot.factions_of(category_id).map(|f| f.order_position));
    }

    let updated = FactionRepo::upsert(&state.pool, &faction).await?;
    state.content_changed().await;

    tracing::info!(faction_id = %id, admin_id = %admin.user_id, "Faction updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/factions/{id}
pub async fn delete_faction(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !FactionRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Faction",
            id,
        }));
    }
    state.content_changed().await;

    tracing::info!(faction_id = %id, admin_id = %admin.user_id, "Faction deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/factions/{id}/move
pub async fn move_faction(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MoveRequest>,
) -> AppResult<impl IntoResponse> {
    let strategy = input.strategy.unwrap_or(FACTION_STRATEGY);

    let snapshot = state.snapshot().await?;
    let faction = snapshot.faction(id).ok_or(AppError::Core(CoreError::NotFound {
        entity: "Faction",
        id,
    }))?;

    let before = sibling_factions(&snapshot, faction.category_id);
    let mut siblings = before.clone();
    let outcome = move_item(&mut siblings, id, input.direction, strategy)?;

    let changed = changed_positions(&before, &siblings);
    if !changed.is_empty() {
        FactionRepo::save_all(&state.pool, &changed).await?;
        state.content_changed().await;
        tracing::info!(
            faction_id = %id,
            strategy = %strategy,
            saved = changed.len(),
            admin_id = %admin.user_id,
            "Faction moved",
        );
    }

    Ok(Json(DataResponse {
        data: MoveResponse {
            outcome,
            strategy,
            siblings,
        },
    }))
}
