//! Kiosk Model

use serde::{Deserialize, Serialize};

/// Kiosk registry row (kiosks table)
///
/// `device_user_id` binds the device's identity-provider account to
/// exactly one kiosk; device-facing operations resolve the kiosk through
/// this binding, never from a client-supplied id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Kiosk {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub device_user_id: String,
    pub is_active: bool,
    pub created_at: i64,
}
