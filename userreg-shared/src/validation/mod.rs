/// Input validation rules
///
/// - `email`: Strict email format check shared by the create and lookup handlers

pub mod email;

pub use email::{check_email, is_valid_email, EmailRule};
