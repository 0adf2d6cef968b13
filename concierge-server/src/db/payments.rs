//! Payment transaction queries
//!
//! The coordination core only ever moves a transaction to `cancelled`,
//! and only through cancel-if-not-cancelled so a late or duplicate
//! report can never overwrite an earlier cancellation.

use shared::models::PaymentTransaction;
use shared::util::snowflake_id;
use sqlx::SqlitePool;

use super::BoxError;

const SELECT_COLUMNS: &str = r#"
    SELECT id, reservation_id, transaction_id, amount, tax, pay_type, status,
           approval_no, approved_date, approved_time, card_no, card_name,
           installment, error_code, error_message, cancelled_at, created_at
    FROM payment_transactions
"#;

pub async fn find_by_id(
    pool: &SqlitePool,
    payment_id: i64,
) -> Result<Option<PaymentTransaction>, BoxError> {
    let row: Option<PaymentTransaction> =
        sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(payment_id)
            .fetch_optional(pool)
            .await?;

    Ok(row)
}

pub async fn find_by_transaction_id(
    pool: &SqlitePool,
    transaction_id: &str,
) -> Result<Option<PaymentTransaction>, BoxError> {
    let row: Option<PaymentTransaction> =
        sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE transaction_id = $1"))
            .bind(transaction_id)
            .fetch_optional(pool)
            .await?;

    Ok(row)
}

/// Cancel-if-not-cancelled: stamps cancellation time and approval
/// metadata. Returns rows updated (0 = already cancelled).
pub async fn mark_cancelled(
    pool: &SqlitePool,
    payment_id: i64,
    approval_no: &str,
    approved_date: Option<&str>,
    approved_time: Option<&str>,
    now: i64,
) -> Result<u64, BoxError> {
    let result = sqlx::query(
        r#"
        UPDATE payment_transactions
        SET status = 'cancelled',
            cancelled_at = $1,
            approval_no = $2,
            approved_date = COALESCE($3, approved_date),
            approved_time = COALESCE($4, approved_time)
        WHERE id = $5 AND status <> 'cancelled'
        "#,
    )
    .bind(now)
    .bind(approval_no)
    .bind(approved_date)
    .bind(approved_time)
    .bind(payment_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Record an approved payment (upstream approval flow; also used by test
/// fixtures). Returns the internal id.
#[allow(clippy::too_many_arguments)]
pub async fn create_approved(
    pool: &SqlitePool,
    reservation_id: Option<i64>,
    transaction_id: &str,
    amount: i64,
    tax: i64,
    pay_type: &str,
    approval_no: Option<&str>,
    now: i64,
) -> Result<i64, BoxError> {
    let id = snowflake_id();
    sqlx::query(
        r#"
        INSERT INTO payment_transactions
            (id, reservation_id, transaction_id, amount, tax, pay_type, status,
             approval_no, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, 'approved', $7, $8)
        "#,
    )
    .bind(id)
    .bind(reservation_id)
    .bind(transaction_id)
    .bind(amount)
    .bind(tax)
    .bind(pay_type)
    .bind(approval_no)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(id)
}
