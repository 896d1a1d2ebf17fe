use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Idle age constraints (milliseconds)
pub const MIN_MAX_IDLE_MS: u64 = 1_000;
pub const MAX_MAX_IDLE_MS: u64 = 86_400_000;
pub const DEFAULT_MAX_IDLE_MS: u64 = 300_000;

// Pool size constraints
pub const MIN_MAX_ENTRIES: usize = 1;
pub const MAX_MAX_ENTRIES: usize = 10_000;
pub const DEFAULT_MAX_ENTRIES: usize = 32;

/// Connection pool settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Idle age after which a pooled connection is eligible for eviction
    pub max_idle_ms: u64,
    /// Maximum pooled connections; the least-recently-used entry is
    /// evicted to make room
    pub max_entries: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_ms: DEFAULT_MAX_IDLE_MS,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl PoolConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_idle_ms < MIN_MAX_IDLE_MS || self.max_idle_ms > MAX_MAX_IDLE_MS {
            return Err(ConfigError::pool(format!(
                "pool.max_idle_ms must be {}-{}, got {}",
                MIN_MAX_IDLE_MS, MAX_MAX_IDLE_MS, self.max_idle_ms
            )));
        }

        if self.max_entries < MIN_MAX_ENTRIES || self.max_entries > MAX_MAX_ENTRIES {
            return Err(ConfigError::pool(format!(
                "pool.max_entries must be {}-{}, got {}",
                MIN_MAX_ENTRIES, MAX_MAX_ENTRIES, self.max_entries
            )));
        }

        Ok(())
    }
}
