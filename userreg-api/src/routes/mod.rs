/// API route handlers
///
/// - `health`: Health check endpoint
/// - `users`: Create and look up users

pub mod health;
pub mod users;
