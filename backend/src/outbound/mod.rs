//! Outbound adapters implementing domain ports.
//!
//! - **simulated_backend**: latency-only stand-in for the remote service
//! - **example_users**: deterministic generated users as the initial source
//! - **sleeper**: tokio-backed and immediate [`Sleeper`] implementations
//!
//! Adapters are thin translators between domain types and their
//! infrastructure. They contain no business logic.
//!
//! [`Sleeper`]: crate::domain::ports::Sleeper

mod example_users;
mod simulated_backend;
mod sleeper;

pub use example_users::ExampleUserSource;
pub use simulated_backend::{LatencyProfile, SimulatedBackend};
pub use sleeper::{ImmediateSleeper, TokioSleeper};
