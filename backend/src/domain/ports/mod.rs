//! Domain ports and supporting types for the hexagonal boundary.
//!
//! The store drives the collection through these traits so adapters can be
//! swapped for doubles in tests.

mod macros;
pub(crate) use macros::define_port_error;

mod confirmation;
mod remote_backend;
mod sleeper;
mod user_source;

pub use confirmation::{AlwaysConfirm, ConfirmationGate, ConfirmationPrompt, NeverConfirm};
#[cfg(test)]
pub use confirmation::MockConfirmationGate;
#[cfg(test)]
pub use remote_backend::MockRemoteBackend;
pub use remote_backend::{BackendError, RemoteBackend};
#[cfg(test)]
pub use sleeper::MockSleeper;
pub use sleeper::Sleeper;
#[cfg(test)]
pub use user_source::MockUserSource;
pub use user_source::{FixtureUserSource, UserSource, UserSourceError};
