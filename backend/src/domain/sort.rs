//! Column ordering for the directory table.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// Sortable table column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    /// Numeric identifier.
    #[default]
    Id,
    /// Display name.
    Name,
    /// Email address.
    Email,
    /// Role tag.
    Role,
    /// Status tag.
    Status,
    /// Registration timestamp.
    RegistrationDate,
    /// Last-activity timestamp.
    LastActivity,
    /// Login counter.
    LoginCount,
    /// Post counter.
    PostsCount,
    /// Comment counter.
    CommentsCount,
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active column and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column being sorted.
    pub column: SortColumn,
    /// Direction of the sort.
    pub direction: SortDirection,
}

/// Orders filtered users by one [`SortSpec`].
///
/// # Examples
/// ```
/// use backend::domain::{SortColumn, SortDirection, SortEngine};
///
/// let mut sort = SortEngine::default();
/// sort.sort_by(SortColumn::Name);
/// sort.sort_by(SortColumn::Name);
/// assert_eq!(sort.spec().direction, SortDirection::Desc);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SortEngine {
    spec: SortSpec,
}

impl SortEngine {
    /// Engine starting from `spec`.
    pub const fn new(spec: SortSpec) -> Self {
        Self { spec }
    }

    /// Active column and direction.
    pub const fn spec(&self) -> SortSpec {
        self.spec
    }

    /// Select `column`; repeating the active column flips the direction.
    pub fn sort_by(&mut self, column: SortColumn) {
        if self.spec.column == column {
            self.spec.direction = self.spec.direction.flipped();
        } else {
            self.spec = SortSpec {
                column,
                direction: SortDirection::Asc,
            };
        }
    }

    /// Return a stably sorted copy of `users`.
    ///
    /// Equal keys keep their input order in both directions.
    pub fn apply<'a>(&self, users: &[&'a User]) -> Vec<&'a User> {
        let mut sorted = users.to_vec();
        let SortSpec { column, direction } = self.spec;
        sorted.sort_by(|left, right| {
            let ordering = compare(column, left, right);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        sorted
    }
}

fn compare(column: SortColumn, left: &User, right: &User) -> Ordering {
    match column {
        SortColumn::Id => left.id().cmp(&right.id()),
        SortColumn::Name => compare_text(left.name(), right.name()),
        SortColumn::Email => compare_text(left.email(), right.email()),
        SortColumn::Role => compare_text(
            left.role().map_or("", |role| role.as_str()),
            right.role().map_or("", |role| role.as_str()),
        ),
        SortColumn::Status => compare_text(
            left.status().map_or("", |status| status.as_str()),
            right.status().map_or("", |status| status.as_str()),
        ),
        SortColumn::RegistrationDate => {
            epoch_millis(left.registration_date()).cmp(&epoch_millis(right.registration_date()))
        }
        SortColumn::LastActivity => {
            epoch_millis(left.last_activity()).cmp(&epoch_millis(right.last_activity()))
        }
        SortColumn::LoginCount => left.login_count().cmp(&right.login_count()),
        SortColumn::PostsCount => left.posts_count().cmp(&right.posts_count()),
        SortColumn::CommentsCount => left.comments_count().cmp(&right.comments_count()),
    }
}

fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}

fn epoch_millis(at: Option<DateTime<Utc>>) -> i64 {
    at.map_or(0, |instant| instant.timestamp_millis())
}
