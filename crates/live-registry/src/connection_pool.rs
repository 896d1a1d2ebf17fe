use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

/// A reusable backend connection cached by the registry.
///
/// Entries are shared out by reference; `close` is invoked once when the
/// registry evicts the entry (stale, displaced, or cleanup).
pub trait PooledConnection: Send + Sync + 'static {
    fn close(&self) -> Result<(), crate::HandleError> {
        Ok(())
    }
}

struct PoolEntry {
    conn: Arc<dyn PooledConnection>,
    last_used: Instant,
    use_count: u64,
}

/// Best-effort connection cache keyed by caller string.
///
/// Bookkeeping only; callers close whatever this hands back. All mutation
/// happens under the registry lock.
pub(crate) struct ConnectionPool {
    entries: HashMap<String, PoolEntry>,
    max_entries: usize,
}

impl ConnectionPool {
    pub(crate) fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
        }
    }

    /// Insert a connection, returning any displaced entries for closing:
    /// a previous entry under the same key, or the least-recently-used
    /// entry when the pool is at capacity.
    pub(crate) fn insert(
        &mut self,
        key: String,
        conn: Arc<dyn PooledConnection>,
    ) -> Vec<(String, Arc<dyn PooledConnection>)> {
        let mut displaced = Vec::new();

        if let Some(previous) = self.entries.remove(&key) {
            displaced.push((key.clone(), previous.conn));
        } else if self.entries.len() >= self.max_entries {
            let lru_key = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());

            if let Some(lru_key) = lru_key
                && let Some(lru) = self.entries.remove(&lru_key)
            {
                displaced.push((lru_key, lru.conn));
            }
        }

        self.entries.insert(
            key,
            PoolEntry {
                conn,
                last_used: Instant::now(),
                use_count: 0,
            },
        );

        displaced
    }

    /// Look up a connection, refreshing its last-used time and use counter.
    pub(crate) fn get(&mut self, key: &str) -> Option<Arc<dyn PooledConnection>> {
        let entry = self.entries.get_mut(key)?;
        entry.last_used = Instant::now();
        entry.use_count += 1;

        Some(Arc::clone(&entry.conn))
    }

    /// Remove entries idle strictly longer than `max_age`, returning them
    /// for closing. An entry idle exactly `max_age` is retained.
    pub(crate) fn evict_stale(
        &mut self,
        max_age: Duration,
    ) -> Vec<(String, Arc<dyn PooledConnection>)> {
        let now = Instant::now();
        let stale: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.last_used) > max_age)
            .map(|(key, _)| key.clone())
            .collect();

        stale
            .into_iter()
            .filter_map(|key| self.entries.remove(&key).map(|entry| (key, entry.conn)))
            .collect()
    }

    /// Drain the whole pool, returning every entry for closing.
    pub(crate) fn clear(&mut self) -> Vec<(String, Arc<dyn PooledConnection>)> {
        self.entries
            .drain()
            .map(|(key, entry)| (key, entry.conn))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn use_count(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.use_count)
    }
}
