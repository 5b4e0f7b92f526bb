//! User data model.
//!
//! A [`User`] is one row of the directory. Identity is a positive integer
//! assigned by the store; everything else is editable or informational.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable user identifier.
///
/// Identifiers are assigned monotonically by the store and never reused
/// within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Access the raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<UserId> for u64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Access level of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Regular account.
    User,
    /// Content moderation access.
    Moderator,
}

impl Role {
    /// Wire tag used for serialisation and text comparison.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Account in use.
    Active,
    /// Account switched off.
    Inactive,
}

impl Status {
    /// Wire tag used for serialisation and text comparison.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// The opposite status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directory user.
///
/// ## Invariants
/// - `id` identifies exactly one user in a store.
/// - `email` is unique across the owning collection; the store enforces
///   this at creation and edit time.
///
/// # Examples
/// ```
/// use backend::domain::{Role, Status, User, UserId};
///
/// let user = User::new(UserId::new(7), "Ada Lovelace", "ada@example.com")
///     .with_role(Role::Admin)
///     .with_status(Status::Active);
///
/// assert_eq!(user.id().get(), 7);
/// assert_eq!(user.role(), Some(Role::Admin));
/// assert_eq!(user.login_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    status: Option<Status>,
    #[serde(default)]
    registration_date: Option<DateTime<Utc>>,
    #[serde(default)]
    last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    login_count: u32,
    #[serde(default)]
    posts_count: u32,
    #[serde(default)]
    comments_count: u32,
}

impl User {
    /// Build a user with the required fields; everything else starts unset
    /// or zero.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: None,
            status: None,
            registration_date: None,
            last_activity: None,
            avatar: None,
            login_count: 0,
            posts_count: 0,
            comments_count: 0,
        }
    }

    /// Set the role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the registration timestamp.
    #[must_use]
    pub fn with_registration_date(mut self, at: DateTime<Utc>) -> Self {
        self.registration_date = Some(at);
        self
    }

    /// Set the last-activity timestamp.
    #[must_use]
    pub fn with_last_activity(mut self, at: DateTime<Utc>) -> Self {
        self.last_activity = Some(at);
        self
    }

    /// Set the avatar reference.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Set the activity counters.
    #[must_use]
    pub fn with_counters(mut self, login_count: u32, posts_count: u32, comments_count: u32) -> Self {
        self.login_count = login_count;
        self.posts_count = posts_count;
        self.comments_count = comments_count;
        self
    }

    /// Identifier.
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Role, if assigned.
    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    /// Status, if assigned.
    pub const fn status(&self) -> Option<Status> {
        self.status
    }

    /// Registration timestamp, if known.
    pub const fn registration_date(&self) -> Option<DateTime<Utc>> {
        self.registration_date
    }

    /// Last-activity timestamp, if known.
    pub const fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.last_activity
    }

    /// Avatar reference, if any.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Number of logins.
    pub const fn login_count(&self) -> u32 {
        self.login_count
    }

    /// Number of posts.
    pub const fn posts_count(&self) -> u32 {
        self.posts_count
    }

    /// Number of comments.
    pub const fn comments_count(&self) -> u32 {
        self.comments_count
    }

    pub(crate) fn apply_edit(&mut self, edit: &EditDraft) {
        self.name.clone_from(&edit.name);
        self.email.clone_from(&edit.email);
        self.role = edit.role;
    }

    pub(crate) const fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }
}

/// Pending input for a user that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserDraft {
    /// Requested display name.
    pub name: String,
    /// Requested email address.
    pub email: String,
    /// Requested role.
    pub role: Role,
    /// Whether a welcome email should be sent on creation.
    pub send_welcome_email: bool,
}

impl Default for NewUserDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: Role::User,
            send_welcome_email: true,
        }
    }
}

impl NewUserDraft {
    /// Draft with the given name and email and default role and flags.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}

/// Editable copy of a user's name, email and role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditDraft {
    /// Edited display name.
    pub name: String,
    /// Edited email address.
    pub email: String,
    /// Edited role.
    pub role: Option<Role>,
}

impl EditDraft {
    /// Copy the editable fields of `user`.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
