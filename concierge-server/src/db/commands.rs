//! Command queue operations
//!
//! Producer is the operator console, consumer is the kiosk poller. The
//! claim marks every returned row processed in the same statement that
//! returns it, so a concurrent or retried poll never sees a command twice.
//! Command ids autoincrement, so id order is creation order; the id also
//! serves as the correlation id for commands that expect a result report.

use shared::models::{ClaimedCommand, Command};
use sqlx::SqlitePool;

use super::BoxError;

/// Persist a new unprocessed command for a kiosk, returning its id.
///
/// Repeated enqueues create distinct commands; retries are explicit
/// administrative actions, no dedup key is enforced here.
pub async fn create_command(
    pool: &SqlitePool,
    kiosk_id: i64,
    kind: &str,
    payload: &serde_json::Value,
    created_by: &str,
    now: i64,
) -> Result<i64, BoxError> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO commands (kiosk_id, kind, payload, processed, created_by, created_at)
        VALUES ($1, $2, $3, 0, $4, $5)
        RETURNING id
        "#,
    )
    .bind(kiosk_id)
    .bind(kind)
    .bind(payload)
    .bind(created_by)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// Atomically claim every unprocessed command for a kiosk.
///
/// Single UPDATE … RETURNING: the rows are marked processed in the same
/// statement that returns them. Returned in id order (FIFO within one
/// poll; across polls no ordering is promised, claimed rows never
/// reappear).
pub async fn claim_pending(
    pool: &SqlitePool,
    kiosk_id: i64,
) -> Result<Vec<ClaimedCommand>, BoxError> {
    let rows: Vec<(i64, String, serde_json::Value, i64)> = sqlx::query_as(
        r#"
        UPDATE commands
        SET processed = 1
        WHERE kiosk_id = $1 AND processed = 0
        RETURNING id, kind, payload, created_at
        "#,
    )
    .bind(kiosk_id)
    .fetch_all(pool)
    .await?;

    // RETURNING does not promise row order; sort by id here
    let mut claimed: Vec<ClaimedCommand> = rows
        .into_iter()
        .map(|(id, command, payload, created_at)| ClaimedCommand {
            id,
            command,
            payload,
            created_at,
        })
        .collect();
    claimed.sort_by_key(|c| c.id);

    Ok(claimed)
}

/// Command history for a kiosk (newest first, for the operator console)
pub async fn get_command_history(
    pool: &SqlitePool,
    kiosk_id: i64,
    limit: i32,
    offset: i32,
) -> Result<Vec<Command>, BoxError> {
    let rows: Vec<Command> = sqlx::query_as(
        r#"
        SELECT id, kiosk_id, kind, payload, processed, created_by, created_at
        FROM commands
        WHERE kiosk_id = $1
        ORDER BY id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(kiosk_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
