//! PostgreSQL user store
//!
//! Stores users in a single table whose name is chosen at runtime (for
//! example `users-dev` or `users-prod`). Because the name is interpolated
//! into SQL it is validated up front and always double-quoted.
//!
//! # Example
//!
//! ```no_run
//! use userreg_shared::db::pool::{create_pool, DatabaseConfig};
//! use userreg_shared::store::{PgUserStore, UserStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig {
//!     url: std::env::var("DATABASE_URL")?,
//!     ..Default::default()
//! })
//! .await?;
//!
//! let store = PgUserStore::new(pool, "users-dev")?;
//! store.ensure_schema().await?;
//!
//! let matches = store.query_by_email("user@example.com").await?;
//! println!("{} match(es)", matches.len());
//! # Ok(())
//! # }
//! ```

use crate::db::{pool, schema};
use crate::models::user::User;
use crate::store::{StoreError, StoreResult, UserStore};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Longest accepted table name
///
/// Leaves room for the `_email_idx` suffix within PostgreSQL's 63-byte
/// identifier limit.
pub const MAX_TABLE_NAME_LENGTH: usize = 48;

/// Returns true if `name` can be used as a table name
///
/// Accepts 1 to 48 characters of `[A-Za-z0-9_.-]`.
pub fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_TABLE_NAME_LENGTH
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// PostgreSQL-backed user store
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
    table: String,
}

impl PgUserStore {
    /// Creates a store over `table`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidTable` if the name fails
    /// [`is_valid_table_name`].
    pub fn new(pool: PgPool, table: impl Into<String>) -> StoreResult<Self> {
        let table = table.into();
        if !is_valid_table_name(&table) {
            return Err(StoreError::InvalidTable(table));
        }
        Ok(Self { pool, table })
    }

    /// Table this store reads and writes
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the table and its email index if they don't exist
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        schema::ensure_users_table(&self.pool, &self.table).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn query_by_email(&self, email: &str) -> StoreResult<Vec<User>> {
        debug!(table = %self.table, "Querying users by email");

        let users = sqlx::query_as::<_, User>(&format!(
            r#"SELECT id, email, name FROM "{}" WHERE email = $1"#,
            self.table
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"SELECT id, email, name FROM "{}" WHERE id = $1"#,
            self.table
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn put(&self, user: &User) -> StoreResult<()> {
        sqlx::query(&format!(
            r#"
            INSERT INTO "{}" (id, email, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email, name = EXCLUDED.name
            "#,
            self.table
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        pool::health_check(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
