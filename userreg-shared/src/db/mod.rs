/// PostgreSQL plumbing for the user store
///
/// # Modules
///
/// - `pool`: Connection pool creation, health checks and shutdown
/// - `schema`: Idempotent creation of the users table and its email index
///
/// # Example
///
/// ```no_run
/// use userreg_shared::db::pool::{create_pool, DatabaseConfig};
/// use userreg_shared::db::schema::ensure_users_table;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     })
///     .await?;
///
///     ensure_users_table(&pool, "users-dev").await?;
///     Ok(())
/// }
/// ```

pub mod pool;
pub mod schema;
