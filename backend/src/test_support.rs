//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

use crate::domain::ports::FixtureUserSource;
use crate::domain::{User, UserStore};
use crate::outbound::{ImmediateSleeper, LatencyProfile, SimulatedBackend};

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    now: DateTime<Utc>,
}

impl FixtureClock {
    /// Clock that always reports `now`.
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Store over `users` with a zero-latency simulated backend.
///
/// The store is not loaded yet; call [`UserStore::load`] first.
pub fn instant_store(users: Vec<User>, now: DateTime<Utc>) -> UserStore {
    let backend = SimulatedBackend::with_latency(Arc::new(ImmediateSleeper), LatencyProfile::zero());
    UserStore::new(
        Arc::new(backend),
        Arc::new(FixtureUserSource::new(users)),
        Arc::new(FixtureClock::new(now)),
    )
}
