//! Set of selected user ids.
//!
//! Selection is not bounded to the current page: it survives navigation and
//! filter changes, and only deletion or an explicit clear shrinks it.

use std::collections::BTreeSet;

use super::user::{User, UserId};

/// Tracks which users are selected.
///
/// # Examples
/// ```
/// use backend::domain::{SelectionTracker, UserId};
///
/// let mut selection = SelectionTracker::default();
/// let visible = [UserId::new(1), UserId::new(2)];
///
/// selection.toggle_all(&visible);
/// assert!(selection.all_selected(&visible));
///
/// selection.toggle_all(&visible);
/// assert!(selection.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    ids: BTreeSet<UserId>,
}

impl SelectionTracker {
    /// Flip the selection of `id`.
    pub fn toggle(&mut self, id: UserId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Select `id`.
    pub fn select(&mut self, id: UserId) {
        self.ids.insert(id);
    }

    /// Deselect `id`.
    pub fn deselect(&mut self, id: UserId) {
        self.ids.remove(&id);
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: UserId) -> bool {
        self.ids.contains(&id)
    }

    /// Whether `visible` is non-empty and fully selected.
    pub fn all_selected(&self, visible: &[UserId]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id))
    }

    /// Deselect the visible ids if all are selected, otherwise select them.
    ///
    /// Ids outside `visible` are left untouched either way.
    pub fn toggle_all(&mut self, visible: &[UserId]) {
        if self.all_selected(visible) {
            for id in visible {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(visible.iter().copied());
        }
    }

    /// Deselect every id in `ids`.
    pub fn remove_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a UserId>) {
        for id in ids {
            self.ids.remove(id);
        }
    }

    /// Drop ids that no longer name a user in `users`.
    pub fn retain_existing(&mut self, users: &[User]) {
        self.ids
            .retain(|id| users.iter().any(|user| user.id() == *id));
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<UserId> {
        self.ids.iter().copied().collect()
    }
}
