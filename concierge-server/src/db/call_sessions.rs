//! Call session queries
//!
//! The status column only moves forward (waiting → connected → ended).
//! Both contended transitions — accept and end — are one-row conditional
//! updates keyed on the current status, so concurrent callers resolve to
//! exactly one winner without in-process locks.

use shared::models::{CallSession, CallerType};
use shared::util::{room_name, snowflake_id};
use sqlx::SqlitePool;

use super::BoxError;

/// Create a session in `waiting` with a fresh signaling room name.
pub async fn create_session(
    pool: &SqlitePool,
    kiosk_id: i64,
    project_id: i64,
    caller_type: CallerType,
    now: i64,
) -> Result<CallSession, BoxError> {
    let session = CallSession {
        id: snowflake_id(),
        kiosk_id,
        project_id,
        staff_id: None,
        room_name: room_name(),
        status: "waiting".to_string(),
        caller_type: caller_type.as_str().to_string(),
        started_at: now,
        ended_at: None,
        notes: None,
    };

    sqlx::query(
        r#"
        INSERT INTO call_sessions
            (id, kiosk_id, project_id, room_name, status, caller_type, started_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(session.id)
    .bind(session.kiosk_id)
    .bind(session.project_id)
    .bind(&session.room_name)
    .bind(&session.status)
    .bind(&session.caller_type)
    .bind(session.started_at)
    .execute(pool)
    .await?;

    Ok(session)
}

/// Accept-if-waiting: returns the number of rows updated (0 = lost the
/// race or the session does not exist — caller disambiguates).
pub async fn accept_if_waiting(
    pool: &SqlitePool,
    session_id: i64,
    staff_id: &str,
) -> Result<u64, BoxError> {
    let result = sqlx::query(
        r#"
        UPDATE call_sessions
        SET status = 'connected', staff_id = $1
        WHERE id = $2 AND status = 'waiting'
        "#,
    )
    .bind(staff_id)
    .bind(session_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// End-if-not-ended: stamps `ended_at` with the first end time only.
/// Ending an already-ended session updates nothing (idempotent).
pub async fn end_if_open(
    pool: &SqlitePool,
    session_id: i64,
    notes: Option<&str>,
    now: i64,
) -> Result<u64, BoxError> {
    let result = sqlx::query(
        r#"
        UPDATE call_sessions
        SET status = 'ended', ended_at = $1, notes = COALESCE($2, notes)
        WHERE id = $3 AND status <> 'ended'
        "#,
    )
    .bind(now)
    .bind(notes)
    .bind(session_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn find_by_id(
    pool: &SqlitePool,
    session_id: i64,
) -> Result<Option<CallSession>, BoxError> {
    let row: Option<CallSession> = sqlx::query_as(
        r#"
        SELECT id, kiosk_id, project_id, staff_id, room_name, status, caller_type,
               started_at, ended_at, notes
        FROM call_sessions
        WHERE id = $1
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Waiting sessions for the operator overlay, oldest first.
///
/// `project_scope` limits the list to one project (manager view); `None`
/// returns every project (super-admin view).
pub async fn list_waiting(
    pool: &SqlitePool,
    project_scope: Option<i64>,
) -> Result<Vec<CallSession>, BoxError> {
    let rows: Vec<CallSession> = match project_scope {
        Some(project_id) => {
            sqlx::query_as(
                r#"
                SELECT id, kiosk_id, project_id, staff_id, room_name, status, caller_type,
                       started_at, ended_at, notes
                FROM call_sessions
                WHERE status = 'waiting' AND project_id = $1
                ORDER BY started_at ASC
                "#,
            )
            .bind(project_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as(
                r#"
                SELECT id, kiosk_id, project_id, staff_id, room_name, status, caller_type,
                       started_at, ended_at, notes
                FROM call_sessions
                WHERE status = 'waiting'
                ORDER BY started_at ASC
                "#,
            )
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// The operator's own live session, if any.
pub async fn active_for_staff(
    pool: &SqlitePool,
    staff_id: &str,
) -> Result<Option<CallSession>, BoxError> {
    let row: Option<CallSession> = sqlx::query_as(
        r#"
        SELECT id, kiosk_id, project_id, staff_id, room_name, status, caller_type,
               started_at, ended_at, notes
        FROM call_sessions
        WHERE staff_id = $1 AND status = 'connected'
        ORDER BY started_at DESC
        LIMIT 1
        "#,
    )
    .bind(staff_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// The kiosk-side view: a manager-initiated call rings the kiosk while
/// `waiting`; once picked up either way the kiosk renders `connected`.
pub async fn active_for_kiosk(
    pool: &SqlitePool,
    kiosk_id: i64,
) -> Result<Option<CallSession>, BoxError> {
    let row: Option<CallSession> = sqlx::query_as(
        r#"
        SELECT id, kiosk_id, project_id, staff_id, room_name, status, caller_type,
               started_at, ended_at, notes
        FROM call_sessions
        WHERE kiosk_id = $1 AND status IN ('waiting', 'connected')
        ORDER BY started_at DESC
        LIMIT 1
        "#,
    )
    .bind(kiosk_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Ended sessions, newest first (call history for the console)
pub async fn get_call_history(
    pool: &SqlitePool,
    project_scope: Option<i64>,
    limit: i32,
    offset: i32,
) -> Result<Vec<CallSession>, BoxError> {
    let rows: Vec<CallSession> = match project_scope {
        Some(project_id) => {
            sqlx::query_as(
                r#"
                SELECT id, kiosk_id, project_id, staff_id, room_name, status, caller_type,
                       started_at, ended_at, notes
                FROM call_sessions
                WHERE status = 'ended' AND project_id = $1
                ORDER BY started_at DESC, id DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as(
                r#"
                SELECT id, kiosk_id, project_id, staff_id, room_name, status, caller_type,
                       started_at, ended_at, notes
                FROM call_sessions
                WHERE status = 'ended'
                ORDER BY started_at DESC, id DESC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}
