/// User record storage
///
/// The registry treats its backing store as an external keyed-record store
/// with a secondary index on `email`. Handlers only ever talk to it through
/// the [`UserStore`] trait, which keeps the backend swappable: PostgreSQL in
/// production, an in-memory list in tests and local development.
///
/// # Uniqueness
///
/// Stores do not enforce email uniqueness. `put` inserts whatever it is given;
/// callers that need uniqueness check with `query_by_email` first. That
/// check-then-write is not atomic, so two concurrent writers can both insert
/// the same email.
///
/// # Example
///
/// ```
/// use userreg_shared::models::user::{CreateUser, User};
/// use userreg_shared::store::{InMemoryUserStore, UserStore};
///
/// # async fn example() -> Result<(), userreg_shared::store::StoreError> {
/// let store = InMemoryUserStore::new();
/// let user = User::new(CreateUser {
///     email: "user@example.com".to_string(),
///     name: None,
/// });
///
/// store.put(&user).await?;
/// let found = store.query_by_email("user@example.com").await?;
/// assert_eq!(found, vec![user]);
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use crate::models::user::User;
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failure reported by the database driver
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Table name rejected before any query was built
    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    /// Any other backend failure
    #[error("{0}")]
    Backend(String),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed user record store with a secondary index on email
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns every record whose email matches exactly (case-sensitive)
    ///
    /// Order is backend-defined.
    async fn query_by_email(&self, email: &str) -> StoreResult<Vec<User>>;

    /// Fetches a record by primary key
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Writes a record, replacing any existing record with the same ID
    async fn put(&self, user: &User) -> StoreResult<()>;

    /// Verifies the store is reachable
    async fn health_check(&self) -> StoreResult<()>;

    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;
}
