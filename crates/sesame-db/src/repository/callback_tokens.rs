//! Callback token repository — one-time login codes awaiting exchange.
//!
//! Multiple outstanding codes per email are allowed; stale rows are removed
//! by the age-based sweep in [`delete_older_than`], not on consumption.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// A one-time login code bound to an email, created when the code is sent.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CallbackToken {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

/// Store a freshly generated login code for an email.
pub async fn create_token(
    pool: &PgPool,
    email: &str,
    token: &str,
) -> Result<CallbackToken, sqlx::Error> {
    sqlx::query_as::<_, CallbackToken>(
        r#"
        INSERT INTO callback_tokens (id, email, token, created_at)
        VALUES ($1, $2, $3, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(token)
    .fetch_one(pool)
    .await
}

/// All outstanding codes for an email, newest first.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Vec<CallbackToken>, sqlx::Error> {
    sqlx::query_as::<_, CallbackToken>(
        "SELECT * FROM callback_tokens WHERE email = $1 ORDER BY created_at DESC",
    )
    .bind(email)
    .fetch_all(pool)
    .await
}

/// Bulk-delete codes older than the cutoff, across all emails.
/// Returns the number of rows removed.
pub async fn delete_older_than(
    pool: &PgPool,
    cutoff: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM callback_tokens WHERE created_at < $1")
        .bind(cutoff)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
