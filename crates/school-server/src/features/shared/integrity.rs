//! Cross-entity reference and uniqueness checks
//!
//! These run on the connection of the write transaction. [`lock_class`]
//! takes a `FOR KEY SHARE` lock on the referenced class, so a concurrent
//! class delete waits until the referencing write commits. [`value_taken`] is
//! a fast-fail lookup; the unique constraints on each table remain the
//! authority under concurrent writers.

use sqlx::PgConnection;

/// Confirm a class exists and lock its row until the transaction ends
///
/// Returns `false` when no class has the given id.
#[tracing::instrument(skip(conn))]
pub async fn lock_class(conn: &mut PgConnection, class_id: i64) -> sqlx::Result<bool> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM classes WHERE id = $1 FOR KEY SHARE")
            .bind(class_id)
            .fetch_optional(conn)
            .await?;

    if found.is_none() {
        tracing::debug!("Referenced class does not exist");
    }
    Ok(found.is_some())
}

/// Check a class exists without locking it, for read paths
pub async fn class_exists(conn: &mut PgConnection, class_id: i64) -> sqlx::Result<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1)")
        .bind(class_id)
        .fetch_one(conn)
        .await
}

/// Whether any row other than `exclude_id` already holds `value` in `column`
///
/// `table` and `column` must be trusted identifiers; only `value` and
/// `exclude_id` are bound.
pub async fn value_taken(
    conn: &mut PgConnection,
    table: &'static str,
    column: &'static str,
    value: &str,
    exclude_id: Option<i64>,
) -> sqlx::Result<bool> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {table} \
         WHERE {column} = $1 AND ($2::BIGINT IS NULL OR id <> $2))"
    );
    sqlx::query_scalar(&sql)
        .bind(value)
        .bind(exclude_id)
        .fetch_one(conn)
        .await
}

/// Whether a teacher other than `exclude_id` is already assigned to `class_id`
pub async fn class_has_teacher(
    conn: &mut PgConnection,
    class_id: i64,
    exclude_id: Option<i64>,
) -> sqlx::Result<bool> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM teachers \
         WHERE class_id = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
    )
    .bind(class_id)
    .bind(exclude_id)
    .fetch_one(conn)
    .await
}
