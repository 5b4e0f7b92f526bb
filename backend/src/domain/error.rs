//! Mutation kinds and the errors a store mutation can end with.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::ports::{BackendError, UserSourceError};
use super::user::UserId;
use super::validation::{EMAIL_TAKEN, FieldErrors};

/// Store operation that goes through the remote backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MutationKind {
    /// Initial population of the collection.
    Load,
    /// Creation of one user.
    Create,
    /// Edit of one user.
    Update,
    /// Deletion of one user.
    Delete,
    /// Deletion of every selected user.
    BulkDelete,
    /// Active/inactive switch of one user.
    ToggleStatus,
}

impl MutationKind {
    /// Stable name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::BulkDelete => "bulk_delete",
            Self::ToggleStatus => "toggle_status",
        }
    }

    /// Prefix of the message shown when this mutation fails.
    pub const fn error_prefix(self) -> &'static str {
        match self {
            Self::Load => "Ошибка загрузки данных",
            Self::Create => "Ошибка создания пользователя",
            Self::Update => "Ошибка сохранения",
            Self::Delete | Self::BulkDelete => "Ошибка удаления",
            Self::ToggleStatus => "Ошибка изменения статуса",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a store mutation did not commit.
///
/// The collection is unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// Input failed field validation; nothing was sent to the backend.
    #[error("некорректные данные пользователя")]
    Validation(FieldErrors),
    /// The backend step failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// The initial source failed.
    #[error(transparent)]
    Source(#[from] UserSourceError),
    /// The user disappeared before the mutation committed.
    #[error("пользователь {id} не найден")]
    NotFound {
        /// Missing user.
        id: UserId,
    },
    /// The user has no status to toggle.
    #[error("у пользователя {id} не задан статус")]
    StatusUnset {
        /// User without a status.
        id: UserId,
    },
    /// The source returned two users with the same id.
    #[error("повторяющийся идентификатор пользователя {id}")]
    DuplicateId {
        /// Repeated identifier.
        id: UserId,
    },
    /// Another user took the email while the backend step was in flight.
    #[error("{}: {email}", EMAIL_TAKEN)]
    DuplicateEmail {
        /// Contested address.
        email: String,
    },
}

impl MutationError {
    /// Field messages for a validation failure.
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Message stored in the error slot when `kind` fails with `error`.
///
/// ```
/// use backend::domain::{MutationError, MutationKind, UserId, failure_message};
///
/// let error = MutationError::NotFound { id: UserId::new(4) };
/// assert_eq!(
///     failure_message(MutationKind::Delete, &error),
///     "Ошибка удаления: пользователь 4 не найден"
/// );
/// ```
pub fn failure_message(kind: MutationKind, error: &MutationError) -> String {
    format!("{}: {error}", kind.error_prefix())
}
