//! Remote backend that only simulates latency.
//!
//! Every request waits for the configured duration of its mutation kind and
//! then succeeds. Nothing is persisted.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::MutationKind;
use crate::domain::ports::{BackendError, RemoteBackend, Sleeper};

/// Simulated round-trip time per mutation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    /// Initial load.
    pub load: Duration,
    /// User creation.
    pub create: Duration,
    /// User edit.
    pub update: Duration,
    /// Single delete.
    pub delete: Duration,
    /// Bulk delete.
    pub bulk_delete: Duration,
    /// Status toggle.
    pub toggle_status: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            load: Duration::from_millis(1000),
            create: Duration::from_millis(1000),
            update: Duration::from_millis(500),
            delete: Duration::from_millis(300),
            bulk_delete: Duration::from_millis(500),
            toggle_status: Duration::ZERO,
        }
    }
}

impl LatencyProfile {
    /// Profile with no latency at all.
    pub const fn zero() -> Self {
        Self {
            load: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
            bulk_delete: Duration::ZERO,
            toggle_status: Duration::ZERO,
        }
    }

    /// Latency applied to `kind`.
    pub const fn for_kind(&self, kind: MutationKind) -> Duration {
        match kind {
            MutationKind::Load => self.load,
            MutationKind::Create => self.create,
            MutationKind::Update => self.update,
            MutationKind::Delete => self.delete,
            MutationKind::BulkDelete => self.bulk_delete,
            MutationKind::ToggleStatus => self.toggle_status,
        }
    }
}

/// [`RemoteBackend`] that sleeps and succeeds.
pub struct SimulatedBackend {
    sleeper: Arc<dyn Sleeper>,
    latency: LatencyProfile,
}

impl SimulatedBackend {
    /// Backend with the default latency profile.
    pub fn new(sleeper: Arc<dyn Sleeper>) -> Self {
        Self::with_latency(sleeper, LatencyProfile::default())
    }

    /// Backend with a custom latency profile.
    pub fn with_latency(sleeper: Arc<dyn Sleeper>, latency: LatencyProfile) -> Self {
        Self { sleeper, latency }
    }

    /// Active latency profile.
    pub const fn latency(&self) -> &LatencyProfile {
        &self.latency
    }
}

#[async_trait]
impl RemoteBackend for SimulatedBackend {
    async fn perform(&self, kind: MutationKind) -> Result<(), BackendError> {
        let delay = self.latency.for_kind(kind);
        debug!(mutation = %kind, delay = ?delay, "simulating backend round trip");
        if !delay.is_zero() {
            self.sleeper.sleep(delay).await;
        }
        Ok(())
    }
}
