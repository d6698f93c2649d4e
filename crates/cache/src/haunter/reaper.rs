use crate::accessor::CacheAccessor;
use crate::eviction::Reaper;
use hauntfs_utils::tracing::haunt_span;
use std::ops::ControlFlow;
use std::time::Duration;

use super::Haunter;

/// Streams every entry past a [`Reaper`] and removes the ones it flags
///
/// In-use entries are never offered to the policy. An entry whose metadata
/// cannot be read is left for a later pass.
#[derive(Debug)]
pub struct ReaperHaunterStrategy<R> {
    reaper: R,
}

impl<R: Reaper> ReaperHaunterStrategy<R> {
    pub fn new(reaper: R) -> Self {
        Self { reaper }
    }

    pub fn policy(&self) -> &R {
        &self.reaper
    }
}

/// Wrap a time policy as a boxed [`Haunter`]
pub fn new_reaper_haunter_strategy<R: Reaper + 'static>(reaper: R) -> Box<dyn Haunter> {
    Box::new(ReaperHaunterStrategy::new(reaper))
}

/// Tally of one reaper pass, for logging
#[derive(Debug, Default)]
struct PassCounts {
    visited: usize,
    in_use: usize,
    unreadable: usize,
    removed: usize,
}

impl<R: Reaper> Haunter for ReaperHaunterStrategy<R> {
    fn haunt(&self, accessor: &dyn CacheAccessor) {
        let _span = haunt_span("reaper").entered();
        let mut counts = PassCounts::default();

        accessor.enumerate_entries(&mut |key, entry| {
            counts.visited += 1;

            if entry.in_use() {
                counts.in_use += 1;
                return ControlFlow::Continue(());
            }

            let info = match accessor.stat(entry.name()) {
                Ok(info) => info,
                Err(e) => {
                    tracing::trace!(key, error = %e, "Skipping entry without metadata");
                    counts.unreadable += 1;
                    return ControlFlow::Continue(());
                }
            };

            let (last_read, last_write) = info.access_times();
            if self.reaper.reap(key, last_read, last_write) {
                accessor.remove_file(key);
                counts.removed += 1;
            }

            ControlFlow::Continue(())
        });

        tracing::debug!(
            visited = counts.visited,
            in_use = counts.in_use,
            unreadable = counts.unreadable,
            removed = counts.removed,
            "Reaper haunting pass complete"
        );
    }

    fn next(&self) -> Duration {
        self.reaper.next()
    }
}
