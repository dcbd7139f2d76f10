//! Users table setup
//!
//! The table name is configurable per deployment, so the schema is created
//! with idempotent DDL at startup instead of fixed migration files. Callers
//! must validate the table name first (see
//! `store::postgres::is_valid_table_name`); it is double-quoted but not
//! escaped.

use sqlx::PgPool;
use tracing::{debug, info};

/// Creates the users table and its non-unique email index if missing
///
/// # Errors
///
/// Returns an error if either statement fails.
pub async fn ensure_users_table(pool: &PgPool, table: &str) -> Result<(), sqlx::Error> {
    info!(table, "Ensuring users table exists");

    sqlx::query(&create_table_sql(table)).execute(pool).await?;
    sqlx::query(&create_email_index_sql(table))
        .execute(pool)
        .await?;

    debug!(table, "Users table ready");
    Ok(())
}

fn create_table_sql(table: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS "{table}" (
            id UUID PRIMARY KEY,
            email TEXT NOT NULL,
            name TEXT
        )
        "#
    )
}

fn create_email_index_sql(table: &str) -> String {
    format!(r#"CREATE INDEX IF NOT EXISTS "{table}_email_idx" ON "{table}" (email)"#)
}
