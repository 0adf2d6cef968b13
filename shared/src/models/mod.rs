//! Data models
//!
//! Shared between the coordination server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod call_session;
pub mod command;
pub mod kiosk;
pub mod payment;
pub mod role;

// Re-exports
pub use call_session::*;
pub use command::*;
pub use kiosk::*;
pub use payment::*;
pub use role::*;
