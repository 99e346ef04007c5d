//! Admin handlers for rules.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use regelwerk_core::content::{
    next_order_position, validate_content, validate_rule_target, validate_title, Rule,
};
use regelwerk_core::error::CoreError;
use regelwerk_core::ordering::{changed_positions, move_item, sibling_rules, RULE_STRATEGY};
use regelwerk_core::types::DbId;
use regelwerk_db::models::rule::{CreateRule, UpdateRule};
use regelwerk_db::repositories::RuleRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::reorder::{MoveRequest, MoveResponse};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/rules
///
/// Append a rule to a rulebook.
pub async fn create_rule(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateRule>,
) -> AppResult<impl IntoResponse> {
    validate_title("Title", &input.title)?;
    validate_content(&input.content)?;

    let snapshot = state.snapshot().await?;
    validate_rule_target(&snapshot, input.category_id)?;

    let now = Utc::now();
    let rule = Rule {
        id: Uuid::now_v7(),
        category_id: input.category_id,
        title: input.title.trim().to_string(),
        content: input.content,
        order_position: next_order_position(
            snapshot.rules_of(input.category_id).map(|r| r.order_position),
        ),
        created_at: now,
        updated_at: now,
    };

    let created = RuleRepo::upsert(&state.pool, &rule).await?;
    state.content_changed().await;

    tracing::info!(
        rule_id = %created.id,
        rulebook_id = %created.category_id,
        admin_id = %admin.user_id,
        "Rule created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/admin/rules/{id}
///
/// Partial update. Moving a rule to another rulebook appends it there.
pub async fn update_rule(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRule>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("Title", title)?;
    }
    if let Some(content) = &input.content {
        validate_content(content)?;
    }

    let snapshot = state.snapshot().await?;
    let existing = snapshot.rule(id).ok_or(AppError::Core(CoreError::NotFound {
        entity: "Rule",
        id,
    }))?;

    let mut rule = existing.clone();
    if let Some(title) = input.title {
        rule.title = title.trim().to_string();
    }
    if let Some(content) = input.content {
        rule.content = content;
    }
    if let Some(category_id) = input.category_id.filter(|c| *c != existing.category_id) {
        validate_rule_target(&snapshot, category_id)?;
        rule.category_id = category_id;
        rule.order_position =
            next_order_position(snapshot.rules_of(category_id).map(|r| r.order_position));
    }

    let updated = RuleRepo::upsert(&state.pool, &rule).await?;
    state.content_changed().await;

    tracing::info!(rule_id = %id, admin_id = %admin.user_id, "Rule updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/rules/{id}
pub async fn delete_rule(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !RuleRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Rule", id }));
    }
    state.content_changed().await;

    tracing::info!(rule_id = %id, admin_id = %admin.user_id, "Rule deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/rules/{id}/move
///
/// Move a rule one slot within its rulebook. Defaults to renumbering the
/// whole rulebook.
pub async fn move_rule(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MoveRequest>,
) -> AppResult<impl IntoResponse> {
    let strategy = input.strategy.unwrap_or(RULE_STRATEGY);

    let snapshot = state.snapshot().await?;
    let rule = snapshot.rule(id).ok_or(AppError::Core(CoreError::NotFound {
        entity: "Rule",
        id,
    }))?;

    let before = sibling_rules(&snapshot, rule.category_id);
    let mut siblings = before.clone();
    let outcome = move_item(&mut siblings, id, input.direction, strategy)?;

    let changed = changed_positions(&before, &siblings);
    if !changed.is_empty() {
        RuleRepo::save_all(&state.pool, &changed).await?;
        state.content_changed().await;
        tracing::info!(
            rule_id = %id,
            strategy = %strategy,
            saved = changed.len(),
            admin_id = %admin.user_id,
            "Rule moved",
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
