//! Field validation for new and edited users.
//!
//! Validation is stateless: every function takes the input and the current
//! collection and returns the messages to show beside each field. An empty
//! message means the field is valid.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::user::{EditDraft, NewUserDraft, User, UserId};

/// Minimum number of characters in a trimmed name.
pub const NAME_MIN_CHARS: usize = 3;

/// Shown when the name is empty after trimming.
pub const NAME_REQUIRED: &str = "Имя обязательно для заполнения";
/// Shown when the trimmed name is shorter than [`NAME_MIN_CHARS`].
pub const NAME_TOO_SHORT: &str = "Имя должно содержать минимум 3 символа";
/// Shown when the email is empty after trimming.
pub const EMAIL_REQUIRED: &str = "Email обязателен для заполнения";
/// Shown when the email does not have the `local@domain.tld` shape.
pub const EMAIL_INVALID: &str = "Некорректный формат email";
/// Shown when another user already has the email.
pub const EMAIL_TAKEN: &str = "Пользователь с таким email уже существует";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Per-field validation messages.
///
/// # Examples
/// ```
/// use backend::domain::FieldErrors;
///
/// let errors = FieldErrors::default();
/// assert!(errors.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    /// Message for the name field; empty when valid.
    pub name: String,
    /// Message for the email field; empty when valid.
    pub email: String,
}

impl FieldErrors {
    /// Whether every field is valid.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }
}

/// Check a display name.
///
/// ```
/// use backend::domain::validation::{NAME_TOO_SHORT, validate_name};
///
/// assert_eq!(validate_name("Al"), Some(NAME_TOO_SHORT));
/// assert_eq!(validate_name("Ada"), None);
/// ```
pub fn validate_name(name: &str) -> Option<&'static str> {
    let length = name.trim().chars().count();
    if length == 0 {
        Some(NAME_REQUIRED)
    } else if length < NAME_MIN_CHARS {
        Some(NAME_TOO_SHORT)
    } else {
        None
    }
}

/// Check an email address against syntax and the existing collection.
pub fn validate_email(email: &str, users: &[User]) -> Option<&'static str> {
    check_email(email, users, None)
}

/// Return `true` if the address has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Whether `email` is already used by someone other than `exclude`.
pub fn email_taken(email: &str, users: &[User], exclude: Option<UserId>) -> bool {
    users
        .iter()
        .any(|user| Some(user.id()) != exclude && user.email() == email)
}

fn check_email(email: &str, users: &[User], exclude: Option<UserId>) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !is_valid_email(email) {
        Some(EMAIL_INVALID)
    } else if email_taken(email, users, exclude) {
        Some(EMAIL_TAKEN)
    } else {
        None
    }
}

/// Validate a creation draft.
pub fn validate_new_user(draft: &NewUserDraft, users: &[User]) -> FieldErrors {
    field_errors(&draft.name, &draft.email, users, None)
}

/// Validate an edit of user `id`; its own email does not count as taken.
pub fn validate_edit(id: UserId, draft: &EditDraft, users: &[User]) -> FieldErrors {
    field_errors(&draft.name, &draft.email, users, Some(id))
}

fn field_errors(name: &str, email: &str, users: &[User], exclude: Option<UserId>) -> FieldErrors {
    FieldErrors {
        name: validate_name(name).unwrap_or_default().to_owned(),
        email: check_email(email, users, exclude)
            .unwrap_or_default()
            .to_owned(),
    }
}

/// Whether the creation form may be submitted.
///
/// Requires non-empty trimmed name and email, a syntactically valid email
/// and no recorded field errors.
pub fn is_new_user_valid(draft: &NewUserDraft, errors: &FieldErrors) -> bool {
    !draft.name.trim().is_empty()
        && !draft.email.trim().is_empty()
        && is_valid_email(&draft.email)
        && errors.is_empty()
}
