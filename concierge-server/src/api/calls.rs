//! Call session endpoints: initiate, accept, end, discovery
//!
//! Accept and end are races by design — two operators may pick up the
//! same waiting call, both legs may tear down at once. Losers get benign
//! "already handled" answers, never hard errors.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{CallSession, CallerType, Role};

use crate::auth::{Operation, Principal, permissions};
use crate::db;
use crate::state::AppState;

use super::{ApiResult, resolve_bound_kiosk, verify_kiosk_access};

/// POST /api/calls
#[derive(Deserialize)]
pub struct InitiateCallRequest {
    /// Target kiosk; required for operators, ignored for kiosk callers
    /// (a device always reports as its own bound kiosk)
    pub kiosk_id: Option<i64>,
}

pub async fn initiate_call(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<InitiateCallRequest>,
) -> ApiResult<CallSession> {
    permissions::require(&principal, Operation::InitiateCall)?;

    let (kiosk, caller_type) = if principal.role.is_device_tier() {
        (resolve_bound_kiosk(&state, &principal).await?, CallerType::Kiosk)
    } else {
        let kiosk_id = req.kiosk_id.ok_or_else(|| {
            AppError::validation("kiosk_id is required").with_detail("field", "kiosk_id")
        })?;
        (
            verify_kiosk_access(&state, &principal, kiosk_id).await?,
            CallerType::Manager,
        )
    };

    let now = shared::util::now_millis();
    let session =
        db::call_sessions::create_session(&state.db.pool, kiosk.id, kiosk.project_id, caller_type, now)
            .await
            .map_err(|e| {
                tracing::error!("Create call session error: {e}");
                AppError::new(ErrorCode::InternalError)
            })?;

    tracing::info!(
        session_id = session.id,
        kiosk_id = kiosk.id,
        caller_type = %caller_type,
        "Call session created"
    );

    Ok(Json(session))
}

/// POST /api/calls/{id}/accept
pub async fn accept_call(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    permissions::require(&principal, Operation::AcceptCall)?;

    let session = find_session(&state, session_id).await?;
    check_session_scope(&principal, &session)?;

    let updated = db::call_sessions::accept_if_waiting(&state.db.pool, session_id, &principal.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Accept call error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    if updated == 0 {
        // Someone else picked up (or the call already ended)
        let current = find_session(&state, session_id).await?;
        return Ok(Json(serde_json::json!({
            "already_handled": true,
            "status": current.status,
        })));
    }

    let session = find_session(&state, session_id).await?;
    Ok(Json(serde_json::json!({
        "already_handled": false,
        "session": session,
    })))
}

/// POST /api/calls/{id}/end
#[derive(Deserialize)]
pub struct EndCallRequest {
    pub notes: Option<String>,
}

pub async fn end_call(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<i64>,
    Json(req): Json<EndCallRequest>,
) -> ApiResult<serde_json::Value> {
    permissions::require(&principal, Operation::EndCall)?;

    let session = find_session(&state, session_id).await?;
    if principal.role.is_device_tier() {
        // A device may only tear down calls addressed to its own kiosk
        let kiosk = resolve_bound_kiosk(&state, &principal).await?;
        if session.kiosk_id != kiosk.id {
            return Err(AppError::permission_denied(
                "Session belongs to another kiosk",
            ));
        }
    } else {
        check_session_scope(&principal, &session)?;
    }

    let now = shared::util::now_millis();
    let updated =
        db::call_sessions::end_if_open(&state.db.pool, session_id, req.notes.as_deref(), now)
            .await
            .map_err(|e| {
                tracing::error!("End call error: {e}");
                AppError::new(ErrorCode::InternalError)
            })?;

    // Both legs may race to end the call; the second end is a no-op
    Ok(Json(serde_json::json!({
        "ended": true,
        "already_ended": updated == 0,
    })))
}

/// GET /api/calls/waiting
pub async fn list_waiting_calls(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Vec<CallSession>> {
    permissions::require(&principal, Operation::ListWaitingCalls)?;

    let scope = match operator_scope(&principal) {
        Ok(scope) => scope,
        // A manager without a project claim has no accessible kiosks
        Err(_) => return Ok(Json(Vec::new())),
    };

    let sessions = db::call_sessions::list_waiting(&state.db.pool, scope)
        .await
        .map_err(|e| {
            tracing::error!("Waiting calls query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(sessions))
}

/// GET /api/calls/active
///
/// The caller's own live session: for operators the call they picked up,
/// for kiosks the waiting/connected call addressed to them (this is what
/// makes a manager-initiated call ring the kiosk).
pub async fn active_call(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Option<CallSession>> {
    permissions::require(&principal, Operation::ViewActiveCall)?;

    let session = if principal.role.is_device_tier() {
        let kiosk = resolve_bound_kiosk(&state, &principal).await?;
        db::call_sessions::active_for_kiosk(&state.db.pool, kiosk.id).await
    } else {
        db::call_sessions::active_for_staff(&state.db.pool, &principal.user_id).await
    }
    .map_err(|e| {
        tracing::error!("Active call query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(session))
}

/// GET /api/calls/history
#[derive(Deserialize)]
pub struct CallHistoryQuery {
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

pub async fn call_history(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<CallHistoryQuery>,
) -> ApiResult<Vec<CallSession>> {
    permissions::require(&principal, Operation::ListCallHistory)?;

    let scope = match operator_scope(&principal) {
        Ok(scope) => scope,
        Err(_) => return Ok(Json(Vec::new())),
    };

    let per_page = query.per_page.unwrap_or(20).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let sessions = db::call_sessions::get_call_history(&state.db.pool, scope, per_page, offset)
        .await
        .map_err(|e| {
            tracing::error!("Call history query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(sessions))
}

// ── helpers ──

async fn find_session(state: &AppState, session_id: i64) -> Result<CallSession, AppError> {
    db::call_sessions::find_by_id(&state.db.pool, session_id)
        .await
        .map_err(|e| {
            tracing::error!("Call session lookup error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::CallSessionNotFound))
}

/// Project scope for list queries: fleet-wide roles see everything,
/// managers see their own project. Err means "no accessible projects".
fn operator_scope(principal: &Principal) -> Result<Option<i64>, ()> {
    if principal.role.is_super_admin_class() {
        Ok(None)
    } else {
        principal.project_id.map(Some).ok_or(())
    }
}

fn check_session_scope(principal: &Principal, session: &CallSession) -> Result<(), AppError> {
    if principal.role == Role::Manager && principal.project_id != Some(session.project_id) {
        return Err(AppError::new(ErrorCode::ProjectScopeDenied));
    }
    Ok(())
}
