//! Email format validation
//!
//! A deliberately strict, ASCII-only email check. Rules are evaluated in
//! order and the first failing rule is reported:
//!
//! 1. Non-empty and contains `@`
//! 2. Splitting on the last `@` gives a non-empty local part and domain
//! 3. Local part is at most 64 characters of `[A-Za-z0-9._%+-]`
//! 4. Domain is at most 255 characters of `[A-Za-z0-9.-]`
//! 5. Domain contains a `.` and neither starts nor ends with one
//! 6. The address contains no `..`
//! 7. Every dot-separated domain label is non-empty (at least two labels)
//! 8. The top-level label is at least 2 ASCII letters
//!
//! The check is case-sensitive and performs no trimming or normalization;
//! callers trim input before validating.
//!
//! # Example
//!
//! ```
//! use userreg_shared::validation::{check_email, is_valid_email, EmailRule};
//!
//! assert!(is_valid_email("user+tag@example.org"));
//! assert_eq!(check_email("user@domain"), Err(EmailRule::DomainDot));
//! ```

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Maximum local part length, in characters
pub const MAX_LOCAL_LENGTH: usize = 64;

/// Maximum domain length, in characters
pub const MAX_DOMAIN_LENGTH: usize = 255;

static LOCAL_PART_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+$").unwrap());

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.-]+$").unwrap());

/// The rule an email address failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailRule {
    /// Empty, or no `@` at all
    MissingAt,

    /// Local part or domain is empty
    EmptyPart,

    /// Local part longer than 64 characters
    LocalTooLong,

    /// Local part contains a character outside `[A-Za-z0-9._%+-]`
    LocalCharset,

    /// Domain longer than 255 characters
    DomainTooLong,

    /// Domain contains a character outside `[A-Za-z0-9.-]`
    DomainCharset,

    /// Domain has no `.`, or starts or ends with one
    DomainDot,

    /// Address contains `..`
    ConsecutiveDots,

    /// Domain has an empty label or fewer than two labels
    DomainLabels,

    /// Top-level label is shorter than 2 characters or not alphabetic
    TopLevelDomain,
}

impl fmt::Display for EmailRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailRule::MissingAt => write!(f, "missing @"),
            EmailRule::EmptyPart => write!(f, "empty local part or domain"),
            EmailRule::LocalTooLong => write!(f, "local part too long"),
            EmailRule::LocalCharset => write!(f, "invalid character in local part"),
            EmailRule::DomainTooLong => write!(f, "domain too long"),
            EmailRule::DomainCharset => write!(f, "invalid character in domain"),
            EmailRule::DomainDot => write!(f, "domain dot placement"),
            EmailRule::ConsecutiveDots => write!(f, "consecutive dots"),
            EmailRule::DomainLabels => write!(f, "empty domain label"),
            EmailRule::TopLevelDomain => write!(f, "invalid top-level domain"),
        }
    }
}

/// Checks an email address, reporting the first rule it breaks
///
/// # Errors
///
/// Returns the first [`EmailRule`] the address violates.
pub fn check_email(email: &str) -> Result<(), EmailRule> {
    if email.is_empty() || !email.contains('@') {
        return Err(EmailRule::MissingAt);
    }

    let (local, domain) = email.rsplit_once('@').ok_or(EmailRule::MissingAt)?;
    if local.is_empty() || domain.is_empty() {
        return Err(EmailRule::EmptyPart);
    }

    if local.chars().count() > MAX_LOCAL_LENGTH {
        return Err(EmailRule::LocalTooLong);
    }
    if !LOCAL_PART_RE.is_match(local) {
        return Err(EmailRule::LocalCharset);
    }

    if domain.chars().count() > MAX_DOMAIN_LENGTH {
        return Err(EmailRule::DomainTooLong);
    }
    if !DOMAIN_RE.is_match(domain) {
        return Err(EmailRule::DomainCharset);
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(EmailRule::DomainDot);
    }

    if email.contains("..") {
        return Err(EmailRule::ConsecutiveDots);
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(EmailRule::DomainLabels);
    }

    let tld = labels.last().copied().unwrap_or_default();
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(EmailRule::TopLevelDomain);
    }

    Ok(())
}

/// Returns true if the address passes every email rule
pub fn is_valid_email(email: &str) -> bool {
    check_email(email).is_ok()
}
