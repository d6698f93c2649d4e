//! Background scheduling of haunting passes
//!
//! Each haunter gets its own task that sleeps for the haunter's reported
//! delay, runs one pass on the blocking pool and repeats. Cancellation only
//! takes effect between passes.

use crate::accessor::CacheAccessor;
use crate::config::HauntConfig;
use crate::eviction::create_haunter;
use crate::haunter::Haunter;
use hauntfs_core::{Result, MIN_HAUNT_DELAY};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Drives a set of haunters against one cache
pub struct HauntScheduler {
    accessor: Arc<dyn CacheAccessor>,
    haunters: Vec<Arc<dyn Haunter>>,
    shutdown: CancellationToken,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl HauntScheduler {
    pub fn new(accessor: Arc<dyn CacheAccessor>) -> Self {
        Self {
            accessor,
            haunters: Vec::new(),
            shutdown: CancellationToken::new(),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Build a scheduler running every haunter enabled in `config`
    pub fn from_config(accessor: Arc<dyn CacheAccessor>, config: &HauntConfig) -> Result<Self> {
        let mut scheduler = Self::new(accessor);
        for haunter in config.haunters() {
            scheduler = scheduler.with_haunter(Arc::from(create_haunter(&haunter)?));
        }
        Ok(scheduler)
    }

    pub fn with_haunter(mut self, haunter: Arc<dyn Haunter>) -> Self {
        self.haunters.push(haunter);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn haunter_count(&self) -> usize {
        self.haunters.len()
    }

    /// Spawn one task per haunter on the current tokio runtime
    ///
    /// A scheduler that is already running is left as is.
    pub fn start(&self) {
        let mut handles = self.handles.lock();
        if !handles.is_empty() {
            warn!("Haunt scheduler already started");
            return;
        }

        info!(haunters = self.haunters.len(), "Starting haunt scheduler");
        for haunter in &self.haunters {
            handles.push(tokio::spawn(run_haunter(
                Arc::clone(&self.accessor),
                Arc::clone(haunter),
                self.shutdown.clone(),
            )));
        }
    }

    /// Ask every haunter loop to stop after its current pass
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Stop all loops and wait for in-flight passes to finish
    pub async fn join(&self) {
        self.shutdown();
        let handles: Vec<_> = self.handles.lock().drain(..).collect();
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Haunter task ended abnormally");
            }
        }
    }
}

impl Drop for HauntScheduler {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn run_haunter(
    accessor: Arc<dyn CacheAccessor>,
    haunter: Arc<dyn Haunter>,
    shutdown: CancellationToken,
) {
    loop {
        let delay = haunter.next().max(MIN_HAUNT_DELAY);

        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Haunter loop shutting down");
                break;
            }
            _ = tokio::time::sleep(delay) => {}
        }

        let pass_accessor = Arc::clone(&accessor);
        let pass_haunter = Arc::clone(&haunter);
        match tokio::task::spawn_blocking(move || pass_haunter.haunt(pass_accessor.as_ref())).await
        {
            Ok(()) => {}
            Err(e) if e.is_panic() => {
                error!(error = %e, "Haunting pass panicked");
            }
            Err(e) => {
                warn!(error = %e, "Haunting pass was cancelled");
                break;
            }
        }
    }
}
