//! Name and email validation mirroring backend constraints.
//!
//! These rules match the backend's `domain::validation` module. Keeping them
//! in sync ensures generated records always pass validation when the backend
//! consumes them.
//!
//! # Validation Rules
//!
//! - Names: at least 3 characters once trimmed
//! - Emails: `local@domain.tld` with no whitespace and a single `@`

use std::sync::OnceLock;

use regex::Regex;

/// Minimum number of characters in a trimmed name.
pub const NAME_MIN: usize = 3;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Returns `true` if the trimmed name has at least [`NAME_MIN`] characters.
///
/// ```
/// use example_data::is_valid_name;
///
/// assert!(is_valid_name("Ada Lovelace"));
/// assert!(!is_valid_name("  Al  "));
/// ```
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= NAME_MIN
}

/// Returns `true` if the address has the `local@domain.tld` shape.
///
/// ```
/// use example_data::is_valid_email;
///
/// assert!(is_valid_email("user1@example.com"));
/// assert!(!is_valid_email("user1@example"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}
