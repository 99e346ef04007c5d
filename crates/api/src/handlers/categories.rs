//! Admin handlers for categories, faction-gallery seeding and the orphan report.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use regelwerk_core::content::{
    next_order_position, validate_category_parent, validate_icon, validate_title, Category,
    DEFAULT_ICON,
};
use regelwerk_core::error::CoreError;
use regelwerk_core::integrity::{find_orphans, plan_category_delete, DeletePolicy};
use regelwerk_core::ordering::{changed_positions, move_item, sibling_categories, CATEGORY_STRATEGY};
use regelwerk_core::seed::plan_faction_seed;
use regelwerk_core::types::DbId;
use regelwerk_db::models::category::{CreateCategory, UpdateCategory};
use regelwerk_db::repositories::CategoryRepo;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::reorder::{MoveRequest, MoveResponse};
use crate::middleware::auth::RequireAdmin;
use crate::query::DeleteParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of a successful category delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub policy: DeletePolicy,
    pub categories: u64,
    pub rules: u64,
    pub factions: u64,
}

/// POST /api/v1/admin/categories
///
/// Create a main category (no `parent_id`) or a rulebook under one. The new
/// category goes to the end of its sibling group.
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_title("Title", &input.title)?;
    let icon = input.icon.unwrap_or_else(|| DEFAULT_ICON.to_string());
    validate_icon(&icon)?;

    let snapshot = state.snapshot().await?;
    validate_category_parent(&snapshot, None, input.parent_id)?;

    let order_position = next_order_position(
        sibling_categories(&snapshot, input.parent_id)
            .iter()
            .map(|c| c.order_position),
    );
    let now = Utc::now();
    let category = Category {
        id: Uuid::now_v7(),
        title: input.title.trim().to_string(),
        icon,
        order_position,
        parent_id: input.parent_id,
        kind: input.kind.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    let created = CategoryRepo::upsert(&state.pool, &category).await?;
    state.content_changed().await;

    tracing::info!(
        category_id = %created.id,
        parent_id = ?created.parent_id,
        admin_id = %admin.user_id,
        "Category created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/admin/categories/{id}
///
/// Partial update. Re-parenting moves the category to the end of its new
/// sibling group.
pub async fn update_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("Title", title)?;
    }
    if let Some(icon) = &input.icon {
        validate_icon(icon)?;
    }

    let snapshot = state.snapshot().await?;
    let existing = snapshot.category(id).ok_or(AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    }))?;

    let mut category = existing.clone();
    if let Some(title) = input.title {
        category.title = title.trim().to_string();
    }
    if let Some(icon) = input.icon {
        category.icon = icon;
    }
    if let Some(kind) = input.kind {
        category.kind = kind;
    }
    if let Some(parent_id) = input.parent_id {
        validate_category_parent(&snapshot, Some(id), parent_id)?;
        if parent_id.is_none() && snapshot.rules_of(id).next().is_some() {
            return Err(AppError::Core(CoreError::Validation(
                "A rulebook with rules cannot become a main category".into(),
            )));
        }
        if parent_id != existing.parent_id {
            category.parent_id = parent_id;
            category.order_position = next_order_position(
                sibling_categories(&snapshot, parent_id)
                    .iter()
                    .map(|c| c.order_position),
            );
        }
    }

    let updated = CategoryRepo::upsert(&state.pool, &category).await?;
    state.content_changed().await;

    tracing::info!(category_id = %id, admin_id = %admin.user_id, "Category updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/categories/{id}?policy=restrict|cascade|orphan
///
/// `restrict` (the default) refuses with 409 while the category still has
/// children. `cascade` removes the whole subtree. `orphan` removes only the
/// category and leaves its children stored but unreachable.
pub async fn delete_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<DeleteParams>,
) -> AppResult<impl IntoResponse> {
    let policy = match params.policy.as_deref() {
        Some(raw) => raw.parse::<DeletePolicy>()?,
        None => DeletePolicy::default(),
    };

    let snapshot = state.snapshot().await?;
    let plan = plan_category_delete(&snapshot, id, policy)?;

    let deleted = CategoryRepo::delete_plan(&state.pool, &plan).await?;
    state.content_changed().await;

    if deleted.categories == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    tracing::info!(
        category_id = %id,
        policy = %policy,
        categories = deleted.categories,
        rules = deleted.rules,
        factions = deleted.factions,
        admin_id = %admin.user_id,
        "Category deleted",
    );

    Ok(Json(DataResponse {
        data: DeleteResponse {
            policy,
            categories: deleted.categories,
            rules: deleted.rules,
            factions: deleted.factions,
        },
    }))
}

/// POST /api/v1/admin/categories/{id}/move
///
/// Move a category one slot up or down among categories with the same
/// parent. Defaults to the swap strategy.
pub async fn move_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MoveRequest>,
) -> AppResult<impl IntoResponse> {
    let strategy = input.strategy.unwrap_or(CATEGORY_STRATEGY);

    let snapshot = state.snapshot().await?;
    let category = snapshot.category(id).ok_or(AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    }))?;

    let before = sibling_categories(&snapshot, category.parent_id);
    let mut siblings = before.clone();
    let outcome = move_item(&mut siblings, id, input.direction, strategy)?;

    let changed = changed_positions(&before, &siblings);
    if !changed.is_empty() {
        CategoryRepo::save_all(&state.pool, &changed).await?;
        state.content_changed().await;
        tracing::info!(
            category_id = %id,
            strategy = %strategy,
            saved = changed.len(),
            admin_id = %admin.user_id,
            "Category moved",
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

/// POST /api/v1/admin/categories/seed-factions
///
/// Create the "Fraktionen" main category and its three galleries. Safe to
/// repeat: existing categories are reused and nothing is duplicated.
pub async fn seed_factions(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.snapshot().await?;
    let plan = plan_faction_seed(&snapshot, Utc::now());

    if plan.is_empty() {
        return Ok((StatusCode::OK, Json(DataResponse { data: plan })));
    }

    let changes: Vec<Category> = plan.changes().cloned().collect();
    CategoryRepo::save_all(&state.pool, &changes).await?;
    state.content_changed().await;

    tracing::info!(
        created = plan.created.len(),
        updated = plan.updated.len(),
        admin_id = %admin.user_id,
        "Faction galleries seeded",
    );

    let status = if plan.created.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(DataResponse { data: plan })))
}

/// GET /api/v1/admin/orphans
///
/// Stored content that no page can reach, typically left behind by an
/// `orphan` delete.
pub async fn list_orphans(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.snapshot().await?;
    Ok(Json(DataResponse {
        data: find_orphans(&snapshot),
    }))
}
