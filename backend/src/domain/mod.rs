//! Domain primitives, the derived-view engines and the user store.
//!
//! Purpose: Define the user model, the stateless pipeline stages that turn
//! the collection into a visible page (filter, sort, selection) and the
//! store that owns the collection and its mutation life cycle.
//!
//! Public surface:
//! - User, UserId, Role, Status and the create/edit drafts.
//! - FilterEngine, SortEngine, SelectionTracker: pipeline stages.
//! - UserStore: collection owner and mutation layer.
//! - MutationKind, MutationError: mutation taxonomy and failure messages.
//! - ports: traits the store and screen are driven through.

pub mod error;
pub mod filter;
pub mod ports;
pub mod selection;
pub mod sort;
pub mod user;
pub mod user_store;
pub mod validation;

pub use self::error::{MutationError, MutationKind, failure_message};
pub use self::filter::{FilterCriteria, FilterEngine};
pub use self::selection::SelectionTracker;
pub use self::sort::{SortColumn, SortDirection, SortEngine, SortSpec};
pub use self::user::{EditDraft, NewUserDraft, Role, Status, User, UserId};
pub use self::user_store::{DeleteOutcome, UserStore};
pub use self::validation::FieldErrors;
