use crate::{
    ChannelId, ChannelInfo, HandleError, LiveChannel, Metrics, PooledConnection, RegistryError,
    RegistryStats, ReleaseCapabilities, Result as RegistryResult, create_release_span,
};

use crate::connection_pool::ConnectionPool;

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use live_config::{PoolConfig, RegistryConfig};
use log::{debug, info, warn};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Registry owning the lifecycle of live-update subscriptions
///
/// Single authority for channel handles, per-key debounce timers, and the
/// connection cache. Cloning shares the same underlying state.
pub struct LiveRegistry {
    inner: Arc<Mutex<RegistryInner>>,
    release_grace: Duration,
    max_channels: usize,
    metrics: Metrics,
}

struct RegistryInner {
    /// All registered channels by channel_id
    channels: HashMap<ChannelId, ChannelEntry>,
    /// Pending debounce timers by caller key
    timers: HashMap<String, DebounceTimer>,
    pool: ConnectionPool,
    /// Releases scheduled but not yet executed
    pending_releases: usize,
    /// Monotonic counter guarding the fire-vs-replace race
    timer_generation: u64,
}

struct ChannelEntry {
    handle: Box<dyn LiveChannel>,
    capabilities: ReleaseCapabilities,
    registered_at: DateTime<Utc>,
}

struct DebounceTimer {
    generation: u64,
    task: JoinHandle<()>,
}

impl LiveRegistry {
    pub fn new(config: RegistryConfig, pool: PoolConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                channels: HashMap::new(),
                timers: HashMap::new(),
                pool: ConnectionPool::new(pool.max_entries),
                pending_releases: 0,
                timer_generation: 0,
            })),
            release_grace: Duration::from_millis(config.release_grace_ms),
            max_channels: config.max_channels,
            metrics: Metrics::new(),
        }
    }

    /// Register a handle under `channel_id`, taking exclusive ownership.
    ///
    /// A registration under an id that is already live releases the
    /// superseded handle first; two handles are never live under the same
    /// id. Handles declaring no release operation are rejected here rather
    /// than discovered inert at release time.
    pub async fn register_channel(
        &self,
        channel_id: ChannelId,
        handle: Box<dyn LiveChannel>,
    ) -> RegistryResult<()> {
        let capabilities = handle.capabilities();
        if capabilities.is_inert() {
            warn!("Rejecting inert handle for channel {channel_id}");
            return Err(RegistryError::InertHandle {
                channel_id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut inner = self.inner.lock().await;

        let superseded = inner.channels.remove(&channel_id);

        // Check channel limit (replacements keep the count constant)
        if superseded.is_none() && inner.channels.len() >= self.max_channels {
            warn!(
                "Channel limit reached: {}/{}",
                inner.channels.len(),
                self.max_channels
            );
            return Err(RegistryError::ChannelLimitExceeded {
                current: inner.channels.len(),
                max: self.max_channels,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if superseded.is_some() {
            inner.pending_releases += 1;
        }

        inner.channels.insert(
            channel_id.clone(),
            ChannelEntry {
                handle,
                capabilities,
                registered_at: Utc::now(),
            },
        );
        let total = inner.channels.len();
        drop(inner);

        if let Some(old) = superseded {
            info!("Channel {channel_id} superseded, releasing previous handle");
            self.metrics.channel_replaced();
            self.spawn_release(channel_id.clone(), old);
        }

        self.metrics.channel_registered();
        info!("Registered channel {channel_id} ({total} total)");

        Ok(())
    }

    /// Unregister a channel.
    ///
    /// The map entry is removed before this returns; the handle's release
    /// operations run on a separate task after the configured grace delay.
    pub async fn unregister_channel(&self, channel_id: &ChannelId) {
        let mut inner = self.inner.lock().await;

        let Some(entry) = inner.channels.remove(channel_id) else {
            debug!("Unregister for unknown channel {channel_id}");
            return;
        };

        inner.pending_releases += 1;
        let remaining = inner.channels.len();
        drop(inner);

        info!("Unregistered channel {channel_id} ({remaining} total remaining)");
        self.spawn_release(channel_id.clone(), entry);
    }

    /// Get information about a specific channel
    pub async fn get(&self, channel_id: &ChannelId) -> Option<ChannelInfo> {
        let inner = self.inner.lock().await;

        inner.channels.get(channel_id).map(|entry| ChannelInfo {
            channel_id: channel_id.clone(),
            registered_at: entry.registered_at,
            capabilities: entry.capabilities,
        })
    }

    /// Schedule `callback` to run once `delay` elapses without another call
    /// for the same `key`.
    ///
    /// Last call wins: a pending timer for `key` is cancelled and its
    /// callback dropped, never executed. Callback failures are logged with
    /// the key and never retried or propagated.
    pub async fn debounce<F>(&self, key: impl Into<String>, delay: Duration, callback: F)
    where
        F: FnOnce() -> std::result::Result<(), HandleError> + Send + 'static,
    {
        let key = key.into();
        let mut inner = self.inner.lock().await;

        inner.timer_generation += 1;
        let generation = inner.timer_generation;

        let task = tokio::spawn({
            let inner = Arc::clone(&self.inner);
            let metrics = self.metrics.clone();
            let key = key.clone();
            async move {
                sleep(delay).await;

                let mut guard = inner.lock().await;
                let still_current = guard
                    .timers
                    .get(&key)
                    .is_some_and(|timer| timer.generation == generation);
                if !still_current {
                    // Superseded while waiting
                    return;
                }
                guard.timers.remove(&key);
                drop(guard);

                metrics.debounce_fired();
                if let Err(e) = callback() {
                    warn!("Debounced callback for key {key} failed: {e}");
                    metrics.callback_failed();
                }
            }
        });

        if let Some(previous) = inner.timers.insert(key, DebounceTimer { generation, task }) {
            previous.task.abort();
            self.metrics.debounce_coalesced();
        }
        self.metrics.debounce_scheduled();
    }

    /// Cancel a pending debounce timer, returning whether one was pending
    pub async fn cancel_debounce(&self, key: &str) -> bool {
        let mut inner = self.inner.lock().await;

        match inner.timers.remove(key) {
            Some(timer) => {
                timer.task.abort();
                true
            }
            None => false,
        }
    }

    /// Cache a reusable connection under `key`.
    ///
    /// Displaced entries (same key, or least-recently-used at capacity) are
    /// closed best-effort.
    pub async fn add_to_pool(&self, key: impl Into<String>, conn: Arc<dyn PooledConnection>) {
        let mut inner = self.inner.lock().await;
        let displaced = inner.pool.insert(key.into(), conn);
        drop(inner);

        for (key, conn) in displaced {
            if let Err(e) = conn.close() {
                warn!("Close failed for displaced pooled connection {key}: {e}");
            }
            self.metrics.pool_evicted("displaced");
        }
    }

    /// Fetch a pooled connection, refreshing its last-used time and use
    /// counter. Absence is not an error.
    pub async fn get_from_pool(&self, key: &str) -> Option<Arc<dyn PooledConnection>> {
        let mut inner = self.inner.lock().await;
        let conn = inner.pool.get(key);

        self.metrics.pool_lookup(conn.is_some());
        conn
    }

    /// Close and evict pool entries idle strictly longer than `max_age`.
    ///
    /// A close failure is logged per entry; the scan always completes.
    /// Returns the number of evicted entries.
    pub async fn cleanup_stale_connections(&self, max_age: Duration) -> usize {
        let mut inner = self.inner.lock().await;
        let evicted = inner.pool.evict_stale(max_age);
        drop(inner);

        for (key, conn) in &evicted {
            if let Err(e) = conn.close() {
                warn!("Close failed for stale pooled connection {key}: {e}");
            }
            self.metrics.pool_evicted("stale");
        }

        if !evicted.is_empty() {
            info!("Evicted {} stale pooled connections", evicted.len());
        }
        evicted.len()
    }

    /// Cancel every pending timer, release every channel, and close the
    /// pool. Idempotent; a second call finds nothing to do.
    pub async fn cleanup(&self) {
        let mut inner = self.inner.lock().await;

        let timers: Vec<DebounceTimer> = inner.timers.drain().map(|(_, timer)| timer).collect();
        let channels: Vec<(ChannelId, ChannelEntry)> = inner.channels.drain().collect();
        inner.pending_releases += channels.len();
        let pooled = inner.pool.clear();
        drop(inner);

        info!(
            "Registry cleanup: {} timers cancelled, {} channels released, {} pooled connections closed",
            timers.len(),
            channels.len(),
            pooled.len()
        );

        for timer in timers {
            timer.task.abort();
        }

        for (channel_id, entry) in channels {
            self.spawn_release(channel_id, entry);
        }

        for (key, conn) in pooled {
            if let Err(e) = conn.close() {
                warn!("Close failed for pooled connection {key}: {e}");
            }
            self.metrics.pool_evicted("cleanup");
        }

        self.metrics.cleanup_run();
    }

    /// Get current occupancy counts, no side effects
    pub async fn stats(&self) -> RegistryStats {
        let inner = self.inner.lock().await;

        RegistryStats {
            active_channels: inner.channels.len(),
            active_timers: inner.timers.len(),
            pooled_connections: inner.pool.len(),
            queued_cleanups: inner.pending_releases,
        }
    }

    /// Run the handle's declared release operations on a detached task
    /// after the grace delay. The grace window papers over close races on
    /// the underlying transport; nothing here relies on its length.
    fn spawn_release(&self, channel_id: ChannelId, entry: ChannelEntry) {
        let inner = Arc::clone(&self.inner);
        let metrics = self.metrics.clone();
        let grace = self.release_grace;

        tokio::spawn(async move {
            sleep(grace).await;

            let ChannelEntry {
                mut handle,
                capabilities,
                ..
            } = entry;

            {
                let span = create_release_span(&channel_id);
                let _guard = span.enter();

                if capabilities.unsubscribe
                    && let Err(e) = handle.unsubscribe()
                {
                    warn!("Unsubscribe failed for channel {channel_id}: {e}");
                    metrics.release_failed("unsubscribe");
                }

                if capabilities.close
                    && let Err(e) = handle.close()
                {
                    warn!("Close failed for channel {channel_id}: {e}");
                    metrics.release_failed("close");
                }

                debug!("Released channel {channel_id}");
            }

            metrics.channel_released();

            let mut guard = inner.lock().await;
            guard.pending_releases = guard.pending_releases.saturating_sub(1);
        });
    }
}

impl Default for LiveRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default(), PoolConfig::default())
    }
}

impl Clone for LiveRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            release_grace: self.release_grace,
            max_channels: self.max_channels,
            metrics: self.metrics.clone(),
        }
    }
}
