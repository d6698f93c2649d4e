use crate::accessor::CacheAccessor;
use crate::eviction::LruHaunter;
use hauntfs_utils::tracing::haunt_span;
use std::time::Duration;

use super::Haunter;

/// Applies the batch chosen by an [`LruHaunter`]
///
/// No in-use filtering happens here; the policy owns that decision.
#[derive(Debug)]
pub struct LruHaunterStrategy<H> {
    haunter: H,
}

impl<H: LruHaunter> LruHaunterStrategy<H> {
    pub fn new(haunter: H) -> Self {
        Self { haunter }
    }

    pub fn policy(&self) -> &H {
        &self.haunter
    }
}

/// Wrap a capacity policy as a boxed [`Haunter`]
pub fn new_lru_haunter_strategy<H: LruHaunter + 'static>(haunter: H) -> Box<dyn Haunter> {
    Box::new(LruHaunterStrategy::new(haunter))
}

impl<H: LruHaunter> Haunter for LruHaunterStrategy<H> {
    fn haunt(&self, accessor: &dyn CacheAccessor) {
        let _span = haunt_span("lru").entered();

        let keys = self.haunter.scrub(accessor);
        for key in &keys {
            accessor.remove_file(key);
        }

        tracing::debug!(requested = keys.len(), "LRU haunting pass complete");
    }

    fn next(&self) -> Duration {
        self.haunter.next()
    }
}
