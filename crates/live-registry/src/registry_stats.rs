/// Point-in-time occupancy counts, read without side effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Channels currently registered
    pub active_channels: usize,
    /// Debounce timers currently pending
    pub active_timers: usize,
    /// Connections currently pooled
    pub pooled_connections: usize,
    /// Releases scheduled but not yet executed (grace window)
    pub queued_cleanups: usize,
}
