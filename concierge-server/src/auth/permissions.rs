//! Capability matrix
//!
//! One table answers "may this role perform this operation" for every API
//! boundary. Handlers call [`require`] and never compare role strings.

use shared::error::{AppError, ErrorCode};
use shared::models::Role;

use super::jwt::Principal;

/// Every operation the coordination API exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    EnqueueCommand,
    PollCommands,
    ListCommandHistory,
    InitiateCall,
    AcceptCall,
    EndCall,
    ListWaitingCalls,
    ViewActiveCall,
    ListCallHistory,
    IssueCancellation,
    ReportCancellation,
}

/// The authorization matrix.
///
/// Admin-tier drives the operator console; device-tier is what kiosks
/// authenticate as. Call initiation, call teardown, active-call lookup,
/// and cancellation reports are legal from both tiers.
pub fn allows(role: Role, operation: Operation) -> bool {
    use Operation::*;

    match operation {
        EnqueueCommand | ListCommandHistory | AcceptCall | ListWaitingCalls | ListCallHistory
        | IssueCancellation => role.is_admin_tier(),
        PollCommands => role.is_device_tier(),
        InitiateCall | EndCall | ViewActiveCall | ReportCancellation => {
            role.is_admin_tier() || role.is_device_tier()
        }
    }
}

/// Gate an operation, rejecting before any state is touched.
pub fn require(principal: &Principal, operation: Operation) -> Result<(), AppError> {
    if allows(principal.role, operation) {
        Ok(())
    } else {
        Err(AppError::with_message(
            ErrorCode::PermissionDenied,
            format!("Role {} may not perform this operation", principal.role),
        ))
    }
}
