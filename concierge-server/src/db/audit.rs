//! Operator action audit trail (best-effort)
//!
//! Callers ignore the result: a failed audit write must never fail the
//! request it describes.

use sqlx::SqlitePool;

use super::BoxError;

pub async fn log(
    pool: &SqlitePool,
    actor: &str,
    action: &str,
    detail: Option<&serde_json::Value>,
    now: i64,
) -> Result<(), BoxError> {
    sqlx::query(
        r#"
        INSERT INTO audit_log (actor, action, detail, created_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(actor)
    .bind(action)
    .bind(detail)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}
