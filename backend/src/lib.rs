//! User directory state engine.
//!
//! The crate owns an in-memory user collection behind [`domain::UserStore`],
//! derives the visible table page through the filter, sort and pagination
//! engines, and exposes the admin screen contract in [`inbound::screen`].

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod startup;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::DirectorySettings;
