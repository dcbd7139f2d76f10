//! In-memory user store
//!
//! Keeps records in insertion order behind a `tokio::sync::RwLock`. Email
//! lookups are a linear scan, which is fine for tests and local development.
//! Nothing is persisted across restarts.

use crate::models::user::User;
use crate::store::{StoreResult, UserStore};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory user store
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with existing records
    ///
    /// Records are kept as given, duplicates included.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns true if no records are stored
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn query_by_email(&self, email: &str) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.email == email).cloned().collect())
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn put(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
