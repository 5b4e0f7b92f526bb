//! Owner of the user collection and the selection set.
//!
//! Every mutation follows the same life cycle: mark the store busy, clear
//! the error slot, run the remote step, then commit or fail as a unit. The
//! mutex guarding the state is only taken for short critical sections and
//! never held across an `.await`.
//!
//! Mutations are not serialised against each other. Two in-flight calls may
//! commit in either order and the busy flag reflects whichever finished
//! last.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mockable::Clock;
use tracing::{debug, warn};

use super::error::{MutationError, MutationKind, failure_message};
use super::ports::{ConfirmationGate, ConfirmationPrompt, RemoteBackend, UserSource};
use super::selection::SelectionTracker;
use super::user::{EditDraft, NewUserDraft, Status, User, UserId};
use super::validation::{email_taken, is_new_user_valid, validate_edit, validate_new_user};

/// Result of a delete request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Users were removed.
    Deleted {
        /// Number of users removed.
        count: usize,
    },
    /// The operator declined the confirmation.
    Declined,
    /// A bulk delete was requested with nothing selected.
    NothingSelected,
}

#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    selection: SelectionTracker,
    busy: bool,
    error_message: Option<String>,
    revision: u64,
    high_water: u64,
}

impl StoreState {
    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn position(&self, id: UserId) -> Result<usize, MutationError> {
        self.users
            .iter()
            .position(|user| user.id() == id)
            .ok_or(MutationError::NotFound { id })
    }

    fn user_mut(&mut self, id: UserId) -> Result<&mut User, MutationError> {
        self.users
            .iter_mut()
            .find(|user| user.id() == id)
            .ok_or(MutationError::NotFound { id })
    }

    fn exists(&self, id: UserId) -> bool {
        self.users.iter().any(|user| user.id() == id)
    }

    fn max_id(&self) -> u64 {
        self.users
            .iter()
            .map(|user| user.id().get())
            .max()
            .unwrap_or(0)
    }

    fn next_id(&mut self) -> UserId {
        let next = self.high_water.max(self.max_id()).saturating_add(1);
        self.high_water = next;
        UserId::new(next)
    }
}

/// Clears the busy flag when dropped, including when the owning future is
/// cancelled mid-flight.
struct BusyGuard<'a> {
    store: &'a UserStore,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.store.lock().busy = false;
    }
}

/// The user collection with its mutation layer.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::domain::ports::FixtureUserSource;
/// use backend::domain::{NewUserDraft, UserStore};
/// use backend::outbound::{ImmediateSleeper, SimulatedBackend};
/// use mockable::DefaultClock;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let store = UserStore::new(
///     Arc::new(SimulatedBackend::new(Arc::new(ImmediateSleeper))),
///     Arc::new(FixtureUserSource::default()),
///     Arc::new(DefaultClock),
/// );
/// let created = store
///     .create(&NewUserDraft::new("Ada Lovelace", "ada@example.com"))
///     .await
///     .expect("created");
///
/// assert_eq!(created.id().get(), 1);
/// assert_eq!(store.len(), 1);
/// # });
/// ```
pub struct UserStore {
    state: Mutex<StoreState>,
    backend: Arc<dyn RemoteBackend>,
    source: Arc<dyn UserSource>,
    clock: Arc<dyn Clock>,
}

impl UserStore {
    /// Empty store wired to its ports.
    pub fn new(
        backend: Arc<dyn RemoteBackend>,
        source: Arc<dyn UserSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            backend,
            source,
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, kind: MutationKind) -> BusyGuard<'_> {
        {
            let mut state = self.lock();
            state.busy = true;
            state.error_message = None;
        }
        debug!(mutation = %kind, "mutation started");
        BusyGuard { store: self }
    }

    fn fail(&self, kind: MutationKind, error: &MutationError) {
        warn!(mutation = %kind, error = %error, "mutation failed");
        self.lock().error_message = Some(failure_message(kind, error));
    }

    /// Run the remote step for `kind` and apply `commit` on success.
    async fn mutate<T>(
        &self,
        kind: MutationKind,
        commit: impl FnOnce(&mut StoreState) -> Result<T, MutationError>,
    ) -> Result<T, MutationError> {
        let _busy = self.begin(kind);
        let outcome = match self.backend.perform(kind).await {
            Ok(()) => {
                let mut state = self.lock();
                commit(&mut state).inspect(|_| state.bump())
            }
            Err(error) => Err(error.into()),
        };
        if let Err(error) = &outcome {
            self.fail(kind, error);
        }
        outcome
    }

    /// Replace the collection with the contents of the user source.
    ///
    /// Returns the number of users loaded. The selection keeps only ids that
    /// still exist.
    ///
    /// # Errors
    /// [`MutationError::Source`] or [`MutationError::Backend`] when a port
    /// fails and [`MutationError::DuplicateId`] when the source repeats an id.
    pub async fn load(&self) -> Result<usize, MutationError> {
        let kind = MutationKind::Load;
        let _busy = self.begin(kind);
        let outcome = match self.source.fetch_users().await {
            Ok(users) => match self.backend.perform(kind).await {
                Ok(()) => self.commit_load(users),
                Err(error) => Err(error.into()),
            },
            Err(error) => Err(error.into()),
        };
        match &outcome {
            Ok(count) => debug!(mutation = %kind, count, "collection loaded"),
            Err(error) => self.fail(kind, error),
        }
        outcome
    }

    fn commit_load(&self, users: Vec<User>) -> Result<usize, MutationError> {
        let mut seen = BTreeSet::new();
        if let Some(repeated) = users.iter().find(|user| !seen.insert(user.id())) {
            return Err(MutationError::DuplicateId { id: repeated.id() });
        }
        let mut state = self.lock();
        state.users = users;
        let StoreState {
            users, selection, ..
        } = &mut *state;
        selection.retain_existing(users);
        state.high_water = state.high_water.max(state.max_id());
        state.bump();
        Ok(state.users.len())
    }

    /// Validate `draft` and prepend a new active user.
    ///
    /// # Errors
    /// [`MutationError::Validation`] without touching the store when the
    /// draft is invalid, [`MutationError::DuplicateEmail`] when the address
    /// was taken during the remote step, or [`MutationError::Backend`].
    pub async fn create(&self, draft: &NewUserDraft) -> Result<User, MutationError> {
        let errors = self.with_state(|users, _| validate_new_user(draft, users));
        if !is_new_user_valid(draft, &errors) {
            return Err(MutationError::Validation(errors));
        }
        let clock = Arc::clone(&self.clock);
        let created = self
            .mutate(MutationKind::Create, |state| {
                if email_taken(&draft.email, &state.users, None) {
                    return Err(MutationError::DuplicateEmail {
                        email: draft.email.clone(),
                    });
                }
                let now = clock.utc();
                let user = User::new(state.next_id(), draft.name.clone(), draft.email.clone())
                    .with_role(draft.role)
                    .with_status(Status::Active)
                    .with_registration_date(now)
                    .with_last_activity(now);
                state.users.insert(0, user.clone());
                Ok(user)
            })
            .await?;
        debug!(mutation = %MutationKind::Create, user_id = %created.id(), "user created");
        Ok(created)
    }

    /// Apply an edit of name, email and role to user `id`.
    ///
    /// # Errors
    /// [`MutationError::Validation`] for invalid input,
    /// [`MutationError::NotFound`] when the user vanished,
    /// [`MutationError::DuplicateEmail`] or [`MutationError::Backend`].
    pub async fn update(&self, id: UserId, edit: &EditDraft) -> Result<User, MutationError> {
        let errors = self.with_state(|users, _| validate_edit(id, edit, users));
        if !errors.is_empty() {
            return Err(MutationError::Validation(errors));
        }
        let updated = self
            .mutate(MutationKind::Update, |state| {
                if email_taken(&edit.email, &state.users, Some(id)) {
                    return Err(MutationError::DuplicateEmail {
                        email: edit.email.clone(),
                    });
                }
                let user = state.user_mut(id)?;
                user.apply_edit(edit);
                Ok(user.clone())
            })
            .await?;
        debug!(mutation = %MutationKind::Update, user_id = %id, "user updated");
        Ok(updated)
    }

    /// Delete user `id` once `gate` confirms.
    ///
    /// # Errors
    /// [`MutationError::NotFound`] or [`MutationError::Backend`].
    pub async fn delete(
        &self,
        id: UserId,
        gate: &dyn ConfirmationGate,
    ) -> Result<DeleteOutcome, MutationError> {
        if !gate.confirm(&ConfirmationPrompt::DeleteOne) {
            return Ok(DeleteOutcome::Declined);
        }
        let outcome = self
            .mutate(MutationKind::Delete, |state| {
                let index = state.position(id)?;
                state.users.remove(index);
                state.selection.deselect(id);
                Ok(DeleteOutcome::Deleted { count: 1 })
            })
            .await?;
        debug!(mutation = %MutationKind::Delete, user_id = %id, "user deleted");
        Ok(outcome)
    }

    /// Delete every selected user once `gate` confirms.
    ///
    /// The ids removed are the ones selected when the prompt was answered.
    ///
    /// # Errors
    /// [`MutationError::Backend`].
    pub async fn delete_selected(
        &self,
        gate: &dyn ConfirmationGate,
    ) -> Result<DeleteOutcome, MutationError> {
        let ids: BTreeSet<UserId> = self.lock().selection.ids().into_iter().collect();
        if ids.is_empty() {
            return Ok(DeleteOutcome::NothingSelected);
        }
        if !gate.confirm(&ConfirmationPrompt::DeleteMany { count: ids.len() }) {
            return Ok(DeleteOutcome::Declined);
        }
        let outcome = self
            .mutate(MutationKind::BulkDelete, |state| {
                let before = state.users.len();
                state.users.retain(|user| !ids.contains(&user.id()));
                state.selection.remove_all(&ids);
                Ok(DeleteOutcome::Deleted {
                    count: before.saturating_sub(state.users.len()),
                })
            })
            .await?;
        if let DeleteOutcome::Deleted { count } = outcome {
            debug!(mutation = %MutationKind::BulkDelete, count, "selected users deleted");
        }
        Ok(outcome)
    }

    /// Switch user `id` between active and inactive.
    ///
    /// # Errors
    /// [`MutationError::NotFound`], [`MutationError::StatusUnset`] when the
    /// user has no status, or [`MutationError::Backend`].
    pub async fn toggle_status(&self, id: UserId) -> Result<Status, MutationError> {
        let status = self
            .mutate(MutationKind::ToggleStatus, |state| {
                let user = state.user_mut(id)?;
                let next = user
                    .status()
                    .ok_or(MutationError::StatusUnset { id })?
                    .toggled();
                user.set_status(next);
                Ok(next)
            })
            .await?;
        debug!(mutation = %MutationKind::ToggleStatus, user_id = %id, %status, "status toggled");
        Ok(status)
    }

    /// Flip the selection of `id`; unknown ids are ignored.
    pub fn toggle_selection(&self, id: UserId) {
        let mut state = self.lock();
        if state.exists(id) {
            state.selection.toggle(id);
            state.bump();
        }
    }

    /// Select all of `ids`, or deselect them when all are already selected.
    ///
    /// Ids that do not name a user are ignored.
    pub fn toggle_select_all(&self, ids: &[UserId]) {
        let mut state = self.lock();
        let visible: Vec<UserId> = ids.iter().copied().filter(|id| state.exists(*id)).collect();
        state.selection.toggle_all(&visible);
        state.bump();
    }

    /// Deselect everything.
    pub fn clear_selection(&self) {
        let mut state = self.lock();
        state.selection.clear();
        state.bump();
    }

    /// Snapshot of the selection.
    pub fn selection(&self) -> SelectionTracker {
        self.lock().selection.clone()
    }

    /// Snapshot of the collection.
    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().users.is_empty()
    }

    /// Whether a mutation is in flight.
    pub fn is_busy(&self) -> bool {
        self.lock().busy
    }

    /// Message left by the last failed mutation.
    pub fn error_message(&self) -> Option<String> {
        self.lock().error_message.clone()
    }

    /// Counter bumped on every committed change.
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    /// Borrow the collection and selection for the duration of `read`.
    ///
    /// `read` runs under the store lock and must not call back into the
    /// store.
    pub fn with_state<R>(&self, read: impl FnOnce(&[User], &SelectionTracker) -> R) -> R {
        let state = self.lock();
        read(&state.users, &state.selection)
    }
}
