//! User model
//!
//! A user is a record keyed by a generated UUID v4 with a required email and
//! an optional display name. Records are created once and never updated.
//!
//! # Storage layout
//!
//! ```sql
//! CREATE TABLE "users-dev" (
//!     id UUID PRIMARY KEY,
//!     email TEXT NOT NULL,
//!     name TEXT
//! );
//! CREATE INDEX "users-dev_email_idx" ON "users-dev" (email);
//! ```
//!
//! The email index is deliberately non-unique: uniqueness is checked by the
//! create handler before writing, not enforced by the store.
//!
//! # Example
//!
//! ```
//! use userreg_shared::models::user::{CreateUser, User};
//!
//! let user = User::new(CreateUser {
//!     email: "user@example.com".to_string(),
//!     name: None,
//! });
//!
//! let json = serde_json::to_value(&user).unwrap();
//! assert!(json.get("name").is_none());
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a display name, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// User record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4), generated on creation
    pub id: Uuid,

    /// Email address, stored exactly as submitted after trimming
    ///
    /// Comparison is case-sensitive.
    pub email: String,

    /// Optional display name
    ///
    /// Omitted from the JSON representation when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Input for creating a new user
///
/// Both fields are expected to be trimmed and validated already.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Optional display name
    pub name: Option<String>,
}

impl User {
    /// Builds a new user record with a freshly generated ID
    ///
    /// An empty name is treated the same as no name.
    pub fn new(data: CreateUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: data.email,
            name: data.name.filter(|name| !name.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_generates_v4_id() {
        let user = User::new(CreateUser {
            email: "test@example.com".to_string(),
            name: Some("Test User".to_string()),
        });

        assert_eq!(user.id.get_version_num(), 4);
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.name.as_deref(), Some("Test User"));
    }

    #[test]
    fn test_new_user_drops_empty_name() {
        let user = User::new(CreateUser {
            email: "test@example.com".to_string(),
            name: Some(String::new()),
        });

        assert!(user.name.is_none());
    }

    #[test]
    fn test_ids_are_distinct() {
        let a = User::new(CreateUser {
            email: "a@b.co".to_string(),
            name: None,
        });
        let b = User::new(CreateUser {
            email: "a@b.co".to_string(),
            name: None,
        });

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serialization_shape() {
        let user = User::new(CreateUser {
            email: "test@example.com".to_string(),
            name: Some("Jean Dupont".to_string()),
        });

        let json = serde_json::to_value(&user).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 3);
        assert_eq!(object["id"].as_str().unwrap().len(), 36);
        assert_eq!(object["email"], "test@example.com");
        assert_eq!(object["name"], "Jean Dupont");
    }

    #[test]
    fn test_serialization_without_name() {
        let user = User::new(CreateUser {
            email: "test@example.com".to_string(),
            name: None,
        });

        let json = serde_json::to_value(&user).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert!(!object.contains_key("name"));
    }
}
