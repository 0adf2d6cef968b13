//! Shared types for the Concierge platform
//!
//! Common types used across server crates: error types, response
//! structures, domain models, and utility functions.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
