use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Release grace constraints (milliseconds)
pub const MAX_RELEASE_GRACE_MS: u64 = 10_000;
pub const DEFAULT_RELEASE_GRACE_MS: u64 = 100;

// Channel count constraints
pub const MIN_MAX_CHANNELS: usize = 1;
pub const MAX_MAX_CHANNELS: usize = 100_000;
pub const DEFAULT_MAX_CHANNELS: usize = 1024;

/// Subscription registry settings.
/// All values validated to be within reasonable operational ranges.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Delay between removing a channel and releasing its handle.
    /// Workaround for close races on the underlying transport, not a
    /// correctness guarantee; zero is accepted.
    pub release_grace_ms: u64,
    /// Maximum number of concurrently registered channels
    pub max_channels: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            release_grace_ms: DEFAULT_RELEASE_GRACE_MS,
            max_channels: DEFAULT_MAX_CHANNELS,
        }
    }
}

impl RegistryConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.release_grace_ms > MAX_RELEASE_GRACE_MS {
            return Err(ConfigError::registry(format!(
                "registry.release_grace_ms must be at most {}, got {}",
                MAX_RELEASE_GRACE_MS, self.release_grace_ms
            )));
        }

        if self.max_channels < MIN_MAX_CHANNELS || self.max_channels > MAX_MAX_CHANNELS {
            return Err(ConfigError::registry(format!(
                "registry.max_channels must be {}-{}, got {}",
                MIN_MAX_CHANNELS, MAX_MAX_CHANNELS, self.max_channels
            )));
        }

        Ok(())
    }
}
