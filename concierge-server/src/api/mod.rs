//! API routes for concierge-server

pub mod calls;
pub mod commands;
pub mod health;
pub mod payments;

use axum::routing::{get, post};
use axum::{Router, middleware};
use shared::error::{AppError, ErrorCode};
use shared::models::{Kiosk, Role};

use crate::auth::{Principal, auth_middleware};
use crate::db;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Coordination API (bearer-token authenticated)
    let api = Router::new()
        .route("/commands", post(commands::enqueue_command))
        .route("/commands/poll", get(commands::poll_commands))
        .route("/kiosks/{id}/commands", get(commands::list_commands))
        .route("/calls", post(calls::initiate_call))
        .route("/calls/waiting", get(calls::list_waiting_calls))
        .route("/calls/active", get(calls::active_call))
        .route("/calls/history", get(calls::call_history))
        .route("/calls/{id}/accept", post(calls::accept_call))
        .route("/calls/{id}/end", post(calls::end_call))
        .route("/payments/cancel", post(payments::issue_cancellation))
        .route("/payments/cancel-result", post(payments::report_cancellation))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .with_state(state)
}

/// Look up a kiosk an operator is addressing and verify project scope.
///
/// Managers only reach kiosks inside their own project; fleet-wide roles
/// are unscoped. Missing kiosk is NotFound, scope violation is Forbidden —
/// distinct outcomes so misconfiguration is tellable from misuse.
pub async fn verify_kiosk_access(
    state: &AppState,
    principal: &Principal,
    kiosk_id: i64,
) -> Result<Kiosk, AppError> {
    let kiosk = db::kiosks::find_by_id(&state.db.pool, kiosk_id)
        .await
        .map_err(|e| {
            tracing::error!("Kiosk lookup error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::KioskNotFound))?;

    if principal.role == Role::Manager && principal.project_id != Some(kiosk.project_id) {
        return Err(AppError::new(ErrorCode::ProjectScopeDenied));
    }

    Ok(kiosk)
}

/// Resolve the kiosk bound to a device principal.
///
/// "No kiosk bound" is NotFound — distinct from an empty poll result, so
/// a misprovisioned device can tell configuration trouble from idleness.
pub async fn resolve_bound_kiosk(
    state: &AppState,
    principal: &Principal,
) -> Result<Kiosk, AppError> {
    let kiosk = db::kiosks::find_by_device_user(&state.db.pool, &principal.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Kiosk binding lookup error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::KioskNotBound))?;

    if !kiosk.is_active {
        return Err(AppError::new(ErrorCode::KioskInactive));
    }

    Ok(kiosk)
}
