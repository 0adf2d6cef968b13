//! Concierge Server — hotel kiosk fleet coordination
//!
//! Long-running service that lets stateless, intermittently-connected
//! check-in kiosks and human operators coordinate without ever holding a
//! connection to each other:
//!
//! - **Command queue** (`db::commands`, `api::commands`): operator
//!   console enqueues, kiosks poll & claim — at-most-once delivery.
//! - **Call sessions** (`db::call_sessions`, `api::calls`): the
//!   waiting → connected → ended state machine both sides converge on.
//! - **Payment cancellation** (`api::payments`): two-phase remote
//!   execution over the command queue with a correlated result report.
//! - **Auth** (`auth`): bearer-token validation and the role capability
//!   matrix.
//!
//! All contended state lives in SQLite; every race is a one-row
//! conditional UPDATE.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod state;

// Re-export public types
pub use auth::{Claims, Principal, create_token};
pub use config::Config;
pub use db::DbService;
pub use state::AppState;
