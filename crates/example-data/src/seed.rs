//! Generated user record types.
//!
//! These types are independent of backend domain types to avoid circular
//! dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to a generated user.
///
/// Mirrors the backend's `Role` enum without creating a dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleSeed {
    /// Full administrative access.
    Admin,
    /// Regular account.
    #[default]
    User,
    /// Content moderation access.
    Moderator,
}

/// Account status assigned to a generated user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSeed {
    /// Account in use.
    #[default]
    Active,
    /// Account switched off.
    Inactive,
}

/// A generated example user record.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use example_data::{ExampleUserSeed, RoleSeed, StatusSeed};
///
/// let user = ExampleUserSeed {
///     id: 1,
///     name: "Ada Lovelace 1".to_owned(),
///     email: "user1@example.com".to_owned(),
///     role: RoleSeed::Admin,
///     status: StatusSeed::Active,
///     registration_date: Utc::now(),
///     last_activity: Utc::now(),
///     login_count: 0,
///     posts_count: 0,
///     comments_count: 0,
/// };
///
/// assert_eq!(user.role, RoleSeed::Admin);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleUserSeed {
    /// Sequential identifier, starting at 1.
    pub id: u64,
    /// Human-readable name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Assigned role.
    pub role: RoleSeed,
    /// Assigned status.
    pub status: StatusSeed,
    /// When the account was registered.
    pub registration_date: DateTime<Utc>,
    /// Most recent activity.
    pub last_activity: DateTime<Utc>,
    /// Number of logins.
    pub login_count: u32,
    /// Number of posts.
    pub posts_count: u32,
    /// Number of comments.
    pub comments_count: u32,
}
