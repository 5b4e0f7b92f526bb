//! Presentation-layer contract of the user-directory admin screen.
//!
//! [`DirectoryScreen`] owns everything the table shows that is not part of
//! the shared [`UserStore`]: filter, sort and page state, the creation
//! draft and the edit session. User intent arrives as [`ScreenCommand`]s and
//! the outcome the view should react to comes back as a [`ScreenEffect`].
//!
//! The derived chain filter → sort → page is recomputed lazily by
//! [`DirectoryScreen::view`] and cached until either the store revision or
//! the screen revision changes.

use std::sync::Arc;

use chrono::FixedOffset;
use pagination::{PageMeta, PageNavigation, PageSize, PageToken, Paginator, page_window};
use serde::Serialize;
use tracing::debug;

use crate::domain::ports::ConfirmationGate;
use crate::domain::validation::{is_new_user_valid, validate_new_user};
use crate::domain::{
    DeleteOutcome, EditDraft, FieldErrors, FilterEngine, MutationError, NewUserDraft, Role,
    SelectionTracker, SortColumn, SortEngine, Status, User, UserId, UserStore,
};

/// User intent sent to the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Replace the search query.
    SetSearch(String),
    /// Replace the role filter.
    SetRoleFilter(Option<Role>),
    /// Replace the status filter.
    SetStatusFilter(Option<Status>),
    /// Replace the lower registration bound.
    SetDateFrom(String),
    /// Replace the upper registration bound.
    SetDateTo(String),
    /// Remove both registration bounds.
    ClearDateFilter,
    /// Reset every filter.
    ClearAllFilters,
    /// Sort by a column, flipping direction when it is already active.
    SortBy(SortColumn),
    /// Jump to a 1-indexed page.
    GoToPage(usize),
    /// Change rows per page.
    ChangePageSize(PageSize),
    /// Flip the selection of one user.
    ToggleSelection(UserId),
    /// Select or deselect every visible row.
    ToggleSelectAllVisible,
    /// Replace the creation draft.
    UpdateNewUser(NewUserDraft),
    /// Validate and create the drafted user.
    SubmitNewUser,
    /// Open the inline editor for a user.
    StartEdit(UserId),
    /// Replace the edit draft.
    UpdateEdit(EditDraft),
    /// Commit the open edit.
    SaveEdit,
    /// Close the editor without saving.
    CancelEdit,
    /// Delete one user after confirmation.
    DeleteUser(UserId),
    /// Delete every selected user after confirmation.
    DeleteSelected,
    /// Switch a user between active and inactive.
    ToggleStatus(UserId),
    /// Reload the collection from its source.
    Reload,
}

/// What the view should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEffect {
    /// Nothing beyond re-rendering.
    None,
    /// The page changed; scroll the table back to the top.
    ScrollToTop,
    /// A user was created.
    UserCreated(UserId),
    /// Input was rejected; show the field messages.
    Rejected(FieldErrors),
    /// A mutation failed; the message is also in the store's error slot.
    Failed(String),
    /// The operator declined a confirmation.
    Declined,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryRow {
    /// The user shown in the row.
    pub user: User,
    /// Whether the row's checkbox is ticked.
    pub selected: bool,
}

/// Everything needed to render the screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryView {
    /// Rows of the visible page.
    pub rows: Vec<DirectoryRow>,
    /// Position of the visible page.
    pub page: PageMeta,
    /// Compact pager links.
    pub pager: Vec<PageToken>,
    /// Users matching the filters.
    pub filtered_count: usize,
    /// Users in the store.
    pub total_count: usize,
    /// Whether every visible row is selected.
    pub all_selected: bool,
    /// Selected users across all pages.
    pub selected_count: usize,
    /// Whether a mutation is in flight.
    pub busy: bool,
    /// Message left by the last failed mutation.
    pub error_message: Option<String>,
    /// User whose row is being edited.
    pub editing: Option<UserId>,
    /// Whether the creation form may be submitted.
    pub can_submit_new_user: bool,
}

#[derive(Debug, Clone)]
struct EditSession {
    id: UserId,
    draft: EditDraft,
}

#[derive(Debug, Clone)]
struct CachedView {
    key: (u64, u64),
    view: DirectoryView,
}

/// Screen state layered over a shared [`UserStore`].
pub struct DirectoryScreen {
    store: Arc<UserStore>,
    gate: Arc<dyn ConfirmationGate>,
    filter: FilterEngine,
    sort: SortEngine,
    paginator: Paginator,
    new_user: NewUserDraft,
    new_user_errors: FieldErrors,
    editing: Option<EditSession>,
    revision: u64,
    cache: Option<CachedView>,
}

impl DirectoryScreen {
    /// Screen over `store` asking `gate` before deletions.
    pub fn new(store: Arc<UserStore>, gate: Arc<dyn ConfirmationGate>, page_size: PageSize) -> Self {
        Self {
            store,
            gate,
            filter: FilterEngine::new(),
            sort: SortEngine::default(),
            paginator: Paginator::new(page_size),
            new_user: NewUserDraft::default(),
            new_user_errors: FieldErrors::default(),
            editing: None,
            revision: 0,
            cache: None,
        }
    }

    /// Interpret calendar dates in the date filter at `offset`.
    #[must_use]
    pub fn with_date_offset(mut self, offset: FixedOffset) -> Self {
        let criteria = self.filter.criteria().clone();
        self.filter = FilterEngine::with_offset(offset);
        self.filter.set_search(criteria.search);
        self.filter.set_role(criteria.role);
        self.filter.set_status(criteria.status);
        self.filter.set_date_from(criteria.date_from);
        self.filter.set_date_to(criteria.date_to);
        self
    }

    /// Shared store.
    pub const fn store(&self) -> &Arc<UserStore> {
        &self.store
    }

    /// Filter state.
    pub const fn filter(&self) -> &FilterEngine {
        &self.filter
    }

    /// Sort state.
    pub const fn sort(&self) -> &SortEngine {
        &self.sort
    }

    /// Page state.
    pub const fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Creation draft.
    pub const fn new_user(&self) -> &NewUserDraft {
        &self.new_user
    }

    /// Field messages for the creation draft.
    pub const fn new_user_errors(&self) -> &FieldErrors {
        &self.new_user_errors
    }

    /// Open edit session, if any.
    pub fn editing(&self) -> Option<(UserId, &EditDraft)> {
        self.editing.as_ref().map(|session| (session.id, &session.draft))
    }

    const fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn reset_new_user(&mut self) {
        self.new_user = NewUserDraft::default();
        self.new_user_errors = FieldErrors::default();
    }

    fn filtered_len(&self) -> usize {
        self.store.with_state(|users, _| self.filter.apply(users).len())
    }

    fn clamp_page(&mut self) {
        let len = self.filtered_len();
        if self.paginator.clamp(len) {
            self.bump();
        }
    }

    fn visible_ids(&self) -> Vec<UserId> {
        self.store.with_state(|users, _| {
            let filtered = self.filter.apply(users);
            let sorted = self.sort.apply(&filtered);
            self.paginator
                .page(&sorted)
                .items()
                .iter()
                .map(|user| user.id())
                .collect()
        })
    }

    fn failed(&self, error: &MutationError) -> ScreenEffect {
        match error {
            MutationError::Validation(errors) => ScreenEffect::Rejected(errors.clone()),
            _ => ScreenEffect::Failed(
                self.store
                    .error_message()
                    .unwrap_or_else(|| error.to_string()),
            ),
        }
    }

    /// Apply `command` and report what the view should do next.
    pub async fn dispatch(&mut self, command: ScreenCommand) -> ScreenEffect {
        debug!(?command, "screen command");
        match command {
            ScreenCommand::SetSearch(query) => {
                self.filter.set_search(query);
                self.after_filter_change()
            }
            ScreenCommand::SetRoleFilter(role) => {
                self.filter.set_role(role);
                self.after_filter_change()
            }
            ScreenCommand::SetStatusFilter(status) => {
                self.filter.set_status(status);
                self.after_filter_change()
            }
            ScreenCommand::SetDateFrom(value) => {
                self.filter.set_date_from(value);
                self.after_filter_change()
            }
            ScreenCommand::SetDateTo(value) => {
                self.filter.set_date_to(value);
                self.after_filter_change()
            }
            ScreenCommand::ClearDateFilter => {
                self.filter.clear_date_filter();
                self.after_filter_change()
            }
            ScreenCommand::ClearAllFilters => {
                self.filter.clear_all();
                self.after_filter_change()
            }
            ScreenCommand::SortBy(column) => {
                self.sort.sort_by(column);
                self.bump();
                ScreenEffect::None
            }
            ScreenCommand::GoToPage(page) => self.go_to_page(page),
            ScreenCommand::ChangePageSize(size) => {
                self.paginator.set_page_size(size);
                self.bump();
                ScreenEffect::None
            }
            ScreenCommand::ToggleSelection(id) => {
                self.store.toggle_selection(id);
                ScreenEffect::None
            }
            ScreenCommand::ToggleSelectAllVisible => {
                let visible = self.visible_ids();
                self.store.toggle_select_all(&visible);
                ScreenEffect::None
            }
            ScreenCommand::UpdateNewUser(draft) => {
                self.new_user = draft;
                self.new_user_errors = FieldErrors::default();
                self.bump();
                ScreenEffect::None
            }
            ScreenCommand::SubmitNewUser => self.submit_new_user().await,
            ScreenCommand::StartEdit(id) => self.start_edit(id),
            ScreenCommand::UpdateEdit(draft) => {
                if let Some(session) = self.editing.as_mut() {
                    session.draft = draft;
                    self.bump();
                }
                ScreenEffect::None
            }
            ScreenCommand::SaveEdit => self.save_edit().await,
            ScreenCommand::CancelEdit => {
                self.editing = None;
                self.reset_new_user();
                self.bump();
                ScreenEffect::None
            }
            ScreenCommand::DeleteUser(id) => {
                let gate = Arc::clone(&self.gate);
                let outcome = self.store.delete(id, gate.as_ref()).await;
                self.after_delete(outcome)
            }
            ScreenCommand::DeleteSelected => {
                let gate = Arc::clone(&self.gate);
                let outcome = self.store.delete_selected(gate.as_ref()).await;
                self.after_delete(outcome)
            }
            ScreenCommand::ToggleStatus(id) => match self.store.toggle_status(id).await {
                Ok(_) => ScreenEffect::None,
                Err(error) => self.failed(&error),
            },
            ScreenCommand::Reload => {
                let outcome = self.store.load().await;
                self.close_stale_edit();
                self.clamp_page();
                match outcome {
                    Ok(_) => ScreenEffect::None,
                    Err(error) => self.failed(&error),
                }
            }
        }
    }

    /// Close the editor when its user no longer exists.
    fn close_stale_edit(&mut self) {
        let Some(id) = self.editing.as_ref().map(|session| session.id) else {
            return;
        };
        let exists = self
            .store
            .with_state(|users, _| users.iter().any(|user| user.id() == id));
        if !exists {
            self.editing = None;
            self.bump();
        }
    }

    fn after_filter_change(&mut self) -> ScreenEffect {
        self.bump();
        self.clamp_page();
        ScreenEffect::None
    }

    fn go_to_page(&mut self, page: usize) -> ScreenEffect {
        let len = self.filtered_len();
        match self.paginator.go_to_page(page, len) {
            PageNavigation::Moved(_) => {
                self.bump();
                ScreenEffect::ScrollToTop
            }
            PageNavigation::Ignored => ScreenEffect::None,
        }
    }

    async fn submit_new_user(&mut self) -> ScreenEffect {
        let errors = self
            .store
            .with_state(|users, _| validate_new_user(&self.new_user, users));
        if !is_new_user_valid(&self.new_user, &errors) {
            self.new_user_errors = errors.clone();
            self.bump();
            return ScreenEffect::Rejected(errors);
        }
        let draft = self.new_user.clone();
        match self.store.create(&draft).await {
            Ok(user) => {
                self.reset_new_user();
                self.bump();
                self.clamp_page();
                ScreenEffect::UserCreated(user.id())
            }
            Err(error) => {
                if let Some(errors) = error.field_errors() {
                    self.new_user_errors = errors.clone();
                    self.bump();
                }
                self.failed(&error)
            }
        }
    }

    fn start_edit(&mut self, id: UserId) -> ScreenEffect {
        let draft = self.store.with_state(|users, _| {
            users
                .iter()
                .find(|user| user.id() == id)
                .map(EditDraft::from_user)
        });
        match draft {
            Some(draft) => {
                self.editing = Some(EditSession { id, draft });
                self.reset_new_user();
                self.bump();
                ScreenEffect::None
            }
            None => ScreenEffect::Failed(MutationError::NotFound { id }.to_string()),
        }
    }

    async fn save_edit(&mut self) -> ScreenEffect {
        let Some(session) = self.editing.clone() else {
            return ScreenEffect::None;
        };
        match self.store.update(session.id, &session.draft).await {
            Ok(_) => {
                self.editing = None;
                self.reset_new_user();
                self.bump();
                ScreenEffect::None
            }
            Err(error) => self.failed(&error),
        }
    }

    fn after_delete(&mut self, outcome: Result<DeleteOutcome, MutationError>) -> ScreenEffect {
        match outcome {
            Ok(DeleteOutcome::Deleted { .. }) => {
                self.close_stale_edit();
                self.clamp_page();
                ScreenEffect::None
            }
            Ok(DeleteOutcome::Declined) => ScreenEffect::Declined,
            Ok(DeleteOutcome::NothingSelected) => ScreenEffect::None,
            Err(error) => self.failed(&error),
        }
    }

    /// Current view, recomputed only when the store or screen changed.
    ///
    /// The busy flag and error message are always read fresh.
    pub fn view(&mut self) -> DirectoryView {
        let key = (self.store.revision(), self.revision);
        let mut view = match &self.cache {
            Some(cached) if cached.key == key => cached.view.clone(),
            _ => {
                let view = self.compute_view();
                self.cache = Some(CachedView {
                    key,
                    view: view.clone(),
                });
                view
            }
        };
        view.busy = self.store.is_busy();
        view.error_message = self.store.error_message();
        view
    }

    fn compute_view(&mut self) -> DirectoryView {
        let filter = &self.filter;
        let sort = &self.sort;
        let paginator = &mut self.paginator;
        let (rows, page, filtered_count, total_count, all_selected, selected_count) =
            self.store.with_state(|users, selection| {
                let filtered = filter.apply(users);
                let sorted = sort.apply(&filtered);
                paginator.clamp(sorted.len());
                let page = paginator.page(&sorted);
                let rows = rows_for(page.items(), selection);
                let visible: Vec<UserId> = rows.iter().map(|row| row.user.id()).collect();
                (
                    rows,
                    page.meta(),
                    filtered.len(),
                    users.len(),
                    selection.all_selected(&visible),
                    selection.len(),
                )
            });

        DirectoryView {
            rows,
            pager: page_window(page.current_page, page.total_pages),
            page,
            filtered_count,
            total_count,
            all_selected,
            selected_count,
            busy: false,
            error_message: None,
            editing: self.editing.as_ref().map(|session| session.id),
            can_submit_new_user: is_new_user_valid(&self.new_user, &self.new_user_errors),
        }
    }
}

fn rows_for(users: &[&User], selection: &SelectionTracker) -> Vec<DirectoryRow> {
    users
        .iter()
        .map(|user| DirectoryRow {
            user: (*user).clone(),
            selected: selection.is_selected(user.id()),
        })
        .collect()
}
