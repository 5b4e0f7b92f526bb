//! Port for the remote service every mutation round-trips through.

use async_trait::async_trait;

use crate::domain::MutationKind;

use super::define_port_error;

define_port_error! {
    /// Errors raised by remote backend adapters.
    pub enum BackendError {
        /// The service processed the request and refused it.
        Rejected { message: String } => "{message}",
        /// The service could not be reached.
        Unavailable { message: String } => "сервис недоступен: {message}",
    }
}

/// Remote side of a mutation.
///
/// The store calls [`RemoteBackend::perform`] between validation and commit;
/// a failure leaves the collection untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// Carry out the remote step of `kind`.
    async fn perform(&self, kind: MutationKind) -> Result<(), BackendError>;
}
