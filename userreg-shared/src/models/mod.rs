/// Data models for the user registry
///
/// # Models
///
/// - `user`: User records keyed by a generated UUID
///
/// # Example
///
/// ```
/// use userreg_shared::models::user::{CreateUser, User};
///
/// let user = User::new(CreateUser {
///     email: "user@example.com".to_string(),
///     name: Some("Jean Dupont".to_string()),
/// });
///
/// assert_eq!(user.email, "user@example.com");
/// ```

pub mod user;
