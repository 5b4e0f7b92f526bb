//! Directory screen configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::{PageSize, PageSizeError};
use serde::Deserialize;

use crate::outbound::LatencyProfile;

const DEFAULT_USER_COUNT: usize = 100;
const DEFAULT_SEED: u64 = 42;

/// Settings for the demo directory: data volume, paging and latency.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIRECTORY")]
pub struct DirectorySettings {
    /// Rows per page.
    pub page_size: Option<usize>,
    /// Number of generated users.
    pub user_count: Option<usize>,
    /// Seed for the user generator.
    pub seed: Option<u64>,
    /// Answer every confirmation prompt with yes.
    #[ortho_config(default = false)]
    pub auto_confirm: bool,
    /// Simulated load latency in milliseconds.
    pub load_latency_ms: Option<u64>,
    /// Simulated create latency in milliseconds.
    pub create_latency_ms: Option<u64>,
    /// Simulated update latency in milliseconds.
    pub update_latency_ms: Option<u64>,
    /// Simulated delete latency in milliseconds.
    pub delete_latency_ms: Option<u64>,
    /// Simulated bulk delete latency in milliseconds.
    pub bulk_delete_latency_ms: Option<u64>,
    /// Simulated status toggle latency in milliseconds.
    pub toggle_latency_ms: Option<u64>,
    /// Initial search query.
    pub search: Option<String>,
}

impl DirectorySettings {
    /// Validated page size, falling back to [`PageSize::DEFAULT`].
    ///
    /// # Errors
    /// [`PageSizeError::Zero`] when the configured size is zero.
    pub fn page_size(&self) -> Result<PageSize, PageSizeError> {
        self.page_size.map_or(Ok(PageSize::DEFAULT), PageSize::new)
    }

    /// Number of users to generate.
    pub fn user_count(&self) -> usize {
        self.user_count.unwrap_or(DEFAULT_USER_COUNT)
    }

    /// Generator seed.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Initial search query; empty when unset.
    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }

    /// Default latency profile with any configured overrides applied.
    pub fn latency_profile(&self) -> LatencyProfile {
        let defaults = LatencyProfile::default();
        let pick = |value: Option<u64>, fallback: Duration| {
            value.map_or(fallback, Duration::from_millis)
        };
        LatencyProfile {
            load: pick(self.load_latency_ms, defaults.load),
            create: pick(self.create_latency_ms, defaults.create),
            update: pick(self.update_latency_ms, defaults.update),
            delete: pick(self.delete_latency_ms, defaults.delete),
            bulk_delete: pick(self.bulk_delete_latency_ms, defaults.bulk_delete),
            toggle_status: pick(self.toggle_latency_ms, defaults.toggle_status),
        }
    }
}
