//! Payment cancellation round-trip
//!
//! Two decoupled phases over the command queue: an operator issues a
//! `cancel_payment` command (the command id doubles as the correlation
//! id), and the kiosk — seconds or minutes later, or never — reports the
//! terminal's verdict. Nothing here blocks waiting for the other phase.

use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{CancelApproval, CommandKind, PaymentTransaction};

use crate::auth::{Operation, Principal, permissions};
use crate::db;
use crate::state::AppState;

use super::{ApiResult, verify_kiosk_access};

/// POST /api/payments/cancel — issue phase
#[derive(Deserialize)]
pub struct IssueCancellationRequest {
    /// Internal payment id; takes precedence over transaction_id
    pub payment_id: Option<i64>,
    /// External processor transaction id
    pub transaction_id: Option<String>,
    /// Kiosk holding the live terminal
    pub kiosk_id: Option<i64>,
}

pub async fn issue_cancellation(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<IssueCancellationRequest>,
) -> ApiResult<serde_json::Value> {
    permissions::require(&principal, Operation::IssueCancellation)?;

    let kiosk_id = req.kiosk_id.ok_or_else(|| {
        AppError::validation("kiosk_id is required").with_detail("field", "kiosk_id")
    })?;

    let txn = resolve_transaction(&state, req.payment_id, req.transaction_id.as_deref())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound))?;

    if txn.status == "cancelled" {
        return Err(AppError::new(ErrorCode::PaymentAlreadyCancelled));
    }

    verify_kiosk_access(&state, &principal, kiosk_id).await?;

    // The claimed command's own id is the correlation id the kiosk
    // reports back under; the payload only names the target transaction
    let payload = serde_json::json!({
        "payment_id": txn.id,
        "transaction_id": txn.transaction_id,
    });

    let now = shared::util::now_millis();
    let command_id = db::commands::create_command(
        &state.db.pool,
        kiosk_id,
        CommandKind::CancelPayment.as_str(),
        &payload,
        &principal.user_id,
        now,
    )
    .await
    .map_err(|e| {
        tracing::error!("Issue cancellation error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let detail = serde_json::json!({
        "command_id": command_id,
        "payment_id": txn.id,
        "kiosk_id": kiosk_id,
    });
    let _ = db::audit::log(
        &state.db.pool,
        &principal.user_id,
        "payment_cancel_issued",
        Some(&detail),
        now,
    )
    .await;

    Ok(Json(serde_json::json!({ "command_id": command_id })))
}

/// POST /api/payments/cancel-result — report phase
#[derive(Deserialize)]
pub struct ReportCancellationRequest {
    pub payment_id: Option<i64>,
    pub transaction_id: Option<String>,
    /// Correlation id from the issue phase
    pub command_id: Option<i64>,
    pub success: bool,
    pub approval_no: Option<String>,
    pub approved_date: Option<String>,
    pub approved_time: Option<String>,
    pub error_message: Option<String>,
}

/// The report is a terminal notification, not a request: an unresolved
/// transaction gets a success-shaped "already handled" ack rather than an
/// error back at the device.
pub async fn report_cancellation(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<ReportCancellationRequest>,
) -> ApiResult<serde_json::Value> {
    permissions::require(&principal, Operation::ReportCancellation)?;

    if req.payment_id.is_none() && req.transaction_id.is_none() {
        return Err(
            AppError::validation("payment_id or transaction_id is required")
                .with_detail("fields", "payment_id, transaction_id"),
        );
    }

    let now = shared::util::now_millis();

    let Some(txn) =
        resolve_transaction(&state, req.payment_id, req.transaction_id.as_deref()).await?
    else {
        tracing::warn!(
            command_id = req.command_id,
            "Cancellation report for unknown transaction, acknowledging"
        );
        return Ok(Json(serde_json::json!({ "already_handled": true })));
    };

    if !req.success {
        // Terminal-side failure: the transaction stays untouched, the
        // error goes back verbatim and into the audit trail
        let detail = serde_json::json!({
            "payment_id": txn.id,
            "command_id": req.command_id,
            "error_message": req.error_message,
        });
        let _ = db::audit::log(
            &state.db.pool,
            &principal.user_id,
            "payment_cancel_failed",
            Some(&detail),
            now,
        )
        .await;

        return Ok(Json(serde_json::json!({
            "success": false,
            "error_message": req.error_message,
        })));
    }

    let approval_no = req.approval_no.as_deref().filter(|s| !s.is_empty()).ok_or_else(|| {
        AppError::validation("approval_no is required on success")
            .with_detail("field", "approval_no")
    })?;

    let updated = db::payments::mark_cancelled(
        &state.db.pool,
        txn.id,
        approval_no,
        req.approved_date.as_deref(),
        req.approved_time.as_deref(),
        now,
    )
    .await
    .map_err(|e| {
        tracing::error!("Mark cancelled error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    if updated == 0 {
        // Already cancelled by an earlier report — benign
        return Ok(Json(serde_json::json!({ "already_handled": true })));
    }

    let detail = serde_json::json!({
        "payment_id": txn.id,
        "command_id": req.command_id,
        "approval_no": approval_no,
    });
    let _ = db::audit::log(
        &state.db.pool,
        &principal.user_id,
        "payment_cancelled",
        Some(&detail),
        now,
    )
    .await;

    let approval = CancelApproval {
        approval_no: approval_no.to_string(),
        approved_date: req.approved_date,
        approved_time: req.approved_time,
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "approval": approval,
    })))
}

/// Resolve by internal id if present, else by the processor's id.
async fn resolve_transaction(
    state: &AppState,
    payment_id: Option<i64>,
    transaction_id: Option<&str>,
) -> Result<Option<PaymentTransaction>, AppError> {
    let result = match (payment_id, transaction_id) {
        (Some(id), _) => db::payments::find_by_id(&state.db.pool, id).await,
        (None, Some(tx)) => db::payments::find_by_transaction_id(&state.db.pool, tx).await,
        (None, None) => Ok(None),
    };

    result.map_err(|e| {
        tracing::error!("Payment lookup error: {e}");
        AppError::new(ErrorCode::InternalError)
    })
}
