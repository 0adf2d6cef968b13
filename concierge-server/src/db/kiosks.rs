//! Kiosk registry queries

use shared::models::Kiosk;
use shared::util::snowflake_id;
use sqlx::SqlitePool;

use super::BoxError;

/// Resolve the kiosk bound to a device principal.
///
/// Device-facing operations resolve their kiosk through this binding,
/// never from a client-supplied id, so one kiosk cannot poll as another.
pub async fn find_by_device_user(
    pool: &SqlitePool,
    device_user_id: &str,
) -> Result<Option<Kiosk>, BoxError> {
    let row: Option<Kiosk> = sqlx::query_as(
        r#"
        SELECT id, project_id, name, device_user_id, is_active, created_at
        FROM kiosks
        WHERE device_user_id = $1
        "#,
    )
    .bind(device_user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, kiosk_id: i64) -> Result<Option<Kiosk>, BoxError> {
    let row: Option<Kiosk> = sqlx::query_as(
        r#"
        SELECT id, project_id, name, device_user_id, is_active, created_at
        FROM kiosks
        WHERE id = $1
        "#,
    )
    .bind(kiosk_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Register a kiosk (provisioning path; also used by test fixtures)
pub async fn create_kiosk(
    pool: &SqlitePool,
    project_id: i64,
    name: &str,
    device_user_id: &str,
    now: i64,
) -> Result<i64, BoxError> {
    let id = snowflake_id();
    sqlx::query(
        r#"
        INSERT INTO kiosks (id, project_id, name, device_user_id, is_active, created_at)
        VALUES ($1, $2, $3, $4, 1, $5)
        "#,
    )
    .bind(id)
    .bind(project_id)
    .bind(name)
    .bind(device_user_id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(id)
}
