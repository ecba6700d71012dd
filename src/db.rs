//! Database module
//!
//! Database connection and schema utilities.

use sqlx::{Executor, PgPool};

/// Bundled schema, safe to re-run (every statement is IF NOT EXISTS)
pub const SCHEMA_SQL: &str = include_str!("../migrations/0001_init.sql");

/// Advisory lock key serializing concurrent schema application
const SCHEMA_LOCK_KEY: i64 = 0x7075_6c73_61;

/// Tables the order processor reads and writes
const REQUIRED_TABLES: [&str; 5] = [
    "mst_user",
    "mst_merchant",
    "mst_product",
    "transactions",
    "transaction_detail",
];

/// Simple connectivity check
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the bundled schema.
///
/// Runs on a single connection holding a session advisory lock, so several
/// processes (or parallel test binaries) starting at once do not race on
/// `CREATE TABLE IF NOT EXISTS`.
pub async fn apply_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;

    sqlx::query("SELECT pg_advisory_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *conn)
        .await?;

    // Unparameterized &str goes over the simple query protocol, which accepts
    // multiple statements.
    let applied = (&mut *conn).execute(SCHEMA_SQL).await;

    sqlx::query("SELECT pg_advisory_unlock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *conn)
        .await?;

    applied?;
    tracing::info!("Database schema applied");
    Ok(())
}

/// Check if required tables exist
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    for table in REQUIRED_TABLES {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    Ok(true)
}
