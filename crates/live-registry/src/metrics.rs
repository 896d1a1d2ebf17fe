use metrics::{counter, gauge};

/// Metrics collector for registry operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            prefix: "live_registry",
        }
    }

    /// Record new channel registered
    pub fn channel_registered(&self) {
        counter!(format!("{}.channels.registered", self.prefix)).increment(1);
        gauge!(format!("{}.channels.active", self.prefix)).increment(1.0);
    }

    /// Record channel superseded by a registration under the same id
    pub fn channel_replaced(&self) {
        counter!(format!("{}.channels.replaced", self.prefix)).increment(1);
    }

    /// Record channel handle released
    pub fn channel_released(&self) {
        counter!(format!("{}.channels.released", self.prefix)).increment(1);
        gauge!(format!("{}.channels.active", self.prefix)).decrement(1.0);
    }

    /// Record a failed release operation
    pub fn release_failed(&self, operation: &str) {
        counter!(format!("{}.releases.failed.{}", self.prefix, operation)).increment(1);
    }

    /// Record debounce timer scheduled
    pub fn debounce_scheduled(&self) {
        counter!(format!("{}.debounce.scheduled", self.prefix)).increment(1);
    }

    /// Record debounce timer cancelled by a newer call for the same key
    pub fn debounce_coalesced(&self) {
        counter!(format!("{}.debounce.coalesced", self.prefix)).increment(1);
    }

    /// Record debounced callback fired
    pub fn debounce_fired(&self) {
        counter!(format!("{}.debounce.fired", self.prefix)).increment(1);
    }

    /// Record debounced callback failure
    pub fn callback_failed(&self) {
        counter!(format!("{}.debounce.callback_failed", self.prefix)).increment(1);
    }

    /// Record pool lookup outcome
    pub fn pool_lookup(&self, hit: bool) {
        let outcome = if hit { "hit" } else { "miss" };
        counter!(format!("{}.pool.{}", self.prefix, outcome)).increment(1);
    }

    /// Record pooled connection evicted
    pub fn pool_evicted(&self, reason: &str) {
        counter!(format!("{}.pool.evicted.{}", self.prefix, reason)).increment(1);
    }

    /// Record full registry cleanup
    pub fn cleanup_run(&self) {
        counter!(format!("{}.cleanup.runs", self.prefix)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
