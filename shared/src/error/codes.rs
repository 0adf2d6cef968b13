//! Unified error codes for the Concierge platform
//!
//! This module defines all error codes used across the server and frontend.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Kiosk errors
//! - 4xxx: Command errors
//! - 5xxx: Call session errors
//! - 6xxx: Payment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Kiosk is outside the caller's project scope
    ProjectScopeDenied = 2003,

    // ==================== 3xxx: Kiosk ====================
    /// Kiosk not found
    KioskNotFound = 3001,
    /// No kiosk is bound to the calling principal
    KioskNotBound = 3002,
    /// Kiosk is deactivated
    KioskInactive = 3003,

    // ==================== 4xxx: Command ====================
    /// Command not found
    CommandNotFound = 4001,
    /// Unknown command kind
    CommandKindInvalid = 4002,

    // ==================== 5xxx: Call ====================
    /// Call session not found
    CallSessionNotFound = 5001,
    /// Call session has already ended
    CallAlreadyEnded = 5002,

    // ==================== 6xxx: Payment ====================
    /// Payment transaction not found
    PaymentNotFound = 6001,
    /// Payment has already been cancelled
    PaymentAlreadyCancelled = 6002,
    /// Terminal-side cancellation failed
    PaymentCancelFailed = 6003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::ProjectScopeDenied => "Kiosk is outside your project scope",

            // Kiosk
            ErrorCode::KioskNotFound => "Kiosk not found",
            ErrorCode::KioskNotBound => "No kiosk is bound to this account",
            ErrorCode::KioskInactive => "Kiosk is deactivated",

            // Command
            ErrorCode::CommandNotFound => "Command not found",
            ErrorCode::CommandKindInvalid => "Unknown command kind",

            // Call
            ErrorCode::CallSessionNotFound => "Call session not found",
            ErrorCode::CallAlreadyEnded => "Call session has already ended",

            // Payment
            ErrorCode::PaymentNotFound => "Payment transaction not found",
            ErrorCode::PaymentAlreadyCancelled => "Payment has already been cancelled",
            ErrorCode::PaymentCancelFailed => "Terminal-side cancellation failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            6 => ErrorCode::RequiredField,

            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1003 => ErrorCode::TokenExpired,
            1004 => ErrorCode::TokenInvalid,

            2001 => ErrorCode::PermissionDenied,
            2002 => ErrorCode::RoleRequired,
            2003 => ErrorCode::ProjectScopeDenied,

            3001 => ErrorCode::KioskNotFound,
            3002 => ErrorCode::KioskNotBound,
            3003 => ErrorCode::KioskInactive,

            4001 => ErrorCode::CommandNotFound,
            4002 => ErrorCode::CommandKindInvalid,

            5001 => ErrorCode::CallSessionNotFound,
            5002 => ErrorCode::CallAlreadyEnded,

            6001 => ErrorCode::PaymentNotFound,
            6002 => ErrorCode::PaymentAlreadyCancelled,
            6003 => ErrorCode::PaymentCancelFailed,

            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            9005 => ErrorCode::ConfigError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
