//! Expiry-based reaper policy

use crate::eviction::traits::Reaper;
use std::time::{Duration, SystemTime};

/// Reaps entries that have not been read for longer than `expiry`
#[derive(Debug, Clone)]
pub struct ReaperPolicy {
    /// How long an entry may go unread
    expiry: Duration,
    /// Delay between passes
    period: Duration,
}

impl ReaperPolicy {
    pub fn new(expiry: Duration, period: Duration) -> Self {
        Self { expiry, period }
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Verdict for an entry last read at `last_read`, as of `now`
    pub fn is_expired_at(&self, last_read: SystemTime, now: SystemTime) -> bool {
        match now.checked_sub(self.expiry) {
            Some(cutoff) => last_read < cutoff,
            // Expiry reaches back before the clock's origin
            None => false,
        }
    }
}

impl Reaper for ReaperPolicy {
    fn reap(&self, _key: &str, last_read: SystemTime, _last_write: SystemTime) -> bool {
        self.is_expired_at(last_read, SystemTime::now())
    }

    fn next(&self) -> Duration {
        self.period
    }
}
