//! Port asking the operator to confirm a destructive action.

use std::fmt;

/// Question put to the operator before deleting users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationPrompt {
    /// Deletion of one user.
    DeleteOne,
    /// Deletion of `count` selected users.
    DeleteMany {
        /// Number of users that would be removed.
        count: usize,
    },
}

impl fmt::Display for ConfirmationPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteOne => f.write_str("Вы уверены, что хотите удалить этого пользователя?"),
            Self::DeleteMany { count } => {
                write!(f, "Вы уверены, что хотите удалить {count} пользователей?")
            }
        }
    }
}

/// Synchronous yes/no decision.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmationGate: Send + Sync {
    /// Return `true` to proceed with the action described by `prompt`.
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool;
}

/// Gate that approves everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl ConfirmationGate for AlwaysConfirm {
    fn confirm(&self, _prompt: &ConfirmationPrompt) -> bool {
        true
    }
}

/// Gate that declines everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverConfirm;

impl ConfirmationGate for NeverConfirm {
    fn confirm(&self, _prompt: &ConfirmationPrompt) -> bool {
        false
    }
}
