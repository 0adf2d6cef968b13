//! Command queue endpoints: enqueue, poll & claim, history

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{ClaimedCommand, Command, CommandKind};

use crate::auth::{Operation, Principal, permissions};
use crate::db;
use crate::state::AppState;

use super::{ApiResult, resolve_bound_kiosk, verify_kiosk_access};

/// POST /api/commands
#[derive(Deserialize)]
pub struct EnqueueCommandRequest {
    pub kiosk_id: Option<i64>,
    pub kind: Option<String>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

pub async fn enqueue_command(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<EnqueueCommandRequest>,
) -> ApiResult<serde_json::Value> {
    permissions::require(&principal, Operation::EnqueueCommand)?;

    let kiosk_id = req
        .kiosk_id
        .ok_or_else(|| AppError::validation("kiosk_id is required").with_detail("field", "kiosk_id"))?;
    let kind = req
        .kind
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::validation("kind is required").with_detail("field", "kind"))?;

    // Only enumerated kinds are dispatchable
    let kind: CommandKind = kind
        .parse()
        .map_err(|_| AppError::with_message(ErrorCode::CommandKindInvalid, format!("Unknown command kind: {kind}")))?;

    verify_kiosk_access(&state, &principal, kiosk_id).await?;

    let now = shared::util::now_millis();
    let payload = if req.payload.is_null() {
        serde_json::json!({})
    } else {
        req.payload
    };

    let command_id = db::commands::create_command(
        &state.db.pool,
        kiosk_id,
        kind.as_str(),
        &payload,
        &principal.user_id,
        now,
    )
    .await
    .map_err(|e| {
        tracing::error!("Create command error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let detail = serde_json::json!({
        "command_id": command_id,
        "kiosk_id": kiosk_id,
        "kind": kind.as_str(),
    });
    let _ = db::audit::log(
        &state.db.pool,
        &principal.user_id,
        "command_enqueued",
        Some(&detail),
        now,
    )
    .await;

    Ok(Json(serde_json::json!({ "command_id": command_id })))
}

/// GET /api/commands/poll
///
/// Claims and returns every pending command for the kiosk bound to the
/// calling device principal, oldest first. An empty list means idle —
/// a device with no binding gets NotFound instead.
pub async fn poll_commands(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Vec<ClaimedCommand>> {
    permissions::require(&principal, Operation::PollCommands)?;

    let kiosk = resolve_bound_kiosk(&state, &principal).await?;

    let claimed = db::commands::claim_pending(&state.db.pool, kiosk.id)
        .await
        .map_err(|e| {
            tracing::error!("Command claim error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    if !claimed.is_empty() {
        tracing::info!(
            kiosk_id = kiosk.id,
            count = claimed.len(),
            "Commands claimed by kiosk"
        );
    }

    Ok(Json(claimed))
}

/// GET /api/kiosks/{id}/commands
#[derive(Deserialize)]
pub struct CommandsQuery {
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

pub async fn list_commands(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(kiosk_id): Path<i64>,
    Query(query): Query<CommandsQuery>,
) -> ApiResult<Vec<Command>> {
    permissions::require(&principal, Operation::ListCommandHistory)?;
    verify_kiosk_access(&state, &principal, kiosk_id).await?;

    let per_page = query.per_page.unwrap_or(20).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let commands = db::commands::get_command_history(&state.db.pool, kiosk_id, per_page, offset)
        .await
        .map_err(|e| {
            tracing::error!("Command history query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(commands))
}
