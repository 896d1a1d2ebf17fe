
use crate::{HandleError, LiveChannel, LiveRegistry, PooledConnection, ReleaseCapabilities};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use live_config::{PoolConfig, RegistryConfig};

/// Release-operation invocation counts observed from outside the registry
#[derive(Clone)]
pub(crate) struct ReleaseCounters {
    unsubscribes: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl ReleaseCounters {
    fn new() -> Self {
        Self {
            unsubscribes: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn unsubscribes(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }

    pub(crate) fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

/// Stand-in for a remote change-notification stream handle
pub(crate) struct TestChannel {
    capabilities: ReleaseCapabilities,
    counters: ReleaseCounters,
    fail_unsubscribe: bool,
}

impl TestChannel {
    pub(crate) fn new() -> (Self, ReleaseCounters) {
        let counters = ReleaseCounters::new();
        (
            Self {
                capabilities: ReleaseCapabilities::unsubscribe_and_close(),
                counters: counters.clone(),
                fail_unsubscribe: false,
            },
            counters,
        )
    }

    pub(crate) fn inert() -> Self {
        Self {
            capabilities: ReleaseCapabilities::default(),
            counters: ReleaseCounters::new(),
            fail_unsubscribe: false,
        }
    }

    pub(crate) fn close_only() -> (Self, ReleaseCounters) {
        let counters = ReleaseCounters::new();
        (
            Self {
                capabilities: ReleaseCapabilities::close_only(),
                counters: counters.clone(),
                fail_unsubscribe: false,
            },
            counters,
        )
    }

    pub(crate) fn failing_unsubscribe() -> (Self, ReleaseCounters) {
        let counters = ReleaseCounters::new();
        (
            Self {
                capabilities: ReleaseCapabilities::unsubscribe_and_close(),
                counters: counters.clone(),
                fail_unsubscribe: true,
            },
            counters,
        )
    }
}

impl LiveChannel for TestChannel {
    fn capabilities(&self) -> ReleaseCapabilities {
        self.capabilities
    }

    fn unsubscribe(&mut self) -> Result<(), HandleError> {
        self.counters.unsubscribes.fetch_add(1, Ordering::SeqCst);
        if self.fail_unsubscribe {
            return Err("subscription already dropped by server".into());
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), HandleError> {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Stand-in for a reusable backend connection
pub(crate) struct TestConnection {
    closes: Arc<AtomicUsize>,
    fail_close: bool,
}

impl TestConnection {
    pub(crate) fn new() -> (Arc<Self>, Arc<AtomicUsize>) {
        let closes = Arc::new(AtomicUsize::new(0));
        (
            Arc::new(Self {
                closes: Arc::clone(&closes),
                fail_close: false,
            }),
            closes,
        )
    }

    pub(crate) fn failing_close() -> (Arc<Self>, Arc<AtomicUsize>) {
        let closes = Arc::new(AtomicUsize::new(0));
        (
            Arc::new(Self {
                closes: Arc::clone(&closes),
                fail_close: true,
            }),
            closes,
        )
    }
}

impl PooledConnection for TestConnection {
    fn close(&self) -> Result<(), HandleError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err("transport already gone".into());
        }
        Ok(())
    }
}

pub(crate) fn test_registry(grace_ms: u64) -> LiveRegistry {
    LiveRegistry::new(
        RegistryConfig {
            release_grace_ms: grace_ms,
            ..RegistryConfig::default()
        },
        PoolConfig::default(),
    )
}
