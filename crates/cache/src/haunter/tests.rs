//! Tests for haunting strategies

use super::*;
use crate::entry::FileInfo;
use crate::eviction::ReaperPolicy;
use crate::testing::{ago, FixedScrub, MockAccessor, RecordingReaper};
use proptest::prelude::*;
use std::time::{Duration, SystemTime};

const FIVE_MINUTES: Duration = Duration::from_secs(5 * 60);

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

#[test]
fn test_reaper_removes_stale_idle_entry() {
    let accessor = MockAccessor::new().with_idle("e1", 10, 10 * 60);
    let strategy = ReaperHaunterStrategy::new(ReaperPolicy::new(FIVE_MINUTES, FIVE_MINUTES));

    strategy.haunt(&accessor);

    assert_eq!(accessor.removed(), keys(&["e1"]));
}

#[test]
fn test_reaper_never_removes_in_use_entry() {
    let an_hour_ago = ago(60 * 60);
    let accessor = MockAccessor::new().with_entry(
        "e2",
        true,
        Some(FileInfo::new(10, an_hour_ago, an_hour_ago)),
    );
    let reaper = RecordingReaper::new(FIVE_MINUTES, |_: &str, _, _| true);
    let strategy = ReaperHaunterStrategy::new(reaper);

    strategy.haunt(&accessor);

    assert!(accessor.removed().is_empty());
    // Neither stat nor the policy sees an in-use entry
    assert!(accessor.stats.lock().is_empty());
    assert!(strategy.policy().calls.lock().is_empty());
}

#[test]
fn test_reaper_skips_entry_with_failed_stat_and_continues() {
    let accessor = MockAccessor::new()
        .with_entry("e3", false, None)
        .with_idle("e4", 10, 10 * 60);
    let reaper = RecordingReaper::new(FIVE_MINUTES, |_: &str, _, _| true);
    let strategy = ReaperHaunterStrategy::new(reaper);

    strategy.haunt(&accessor);

    assert_eq!(accessor.removed(), keys(&["e4"]));
    assert_eq!(accessor.visited(), keys(&["e3", "e4"]));
    assert_eq!(*strategy.policy().calls.lock(), keys(&["e4"]));
}

#[test]
fn test_reaper_keeps_fresh_entry() {
    let accessor = MockAccessor::new().with_idle("fresh", 10, 30);
    let strategy = ReaperHaunterStrategy::new(ReaperPolicy::new(FIVE_MINUTES, FIVE_MINUTES));

    strategy.haunt(&accessor);

    assert!(accessor.removed().is_empty());
}

#[test]
fn test_reaper_passes_both_access_times_to_policy() {
    let read = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
    let write = SystemTime::UNIX_EPOCH + Duration::from_secs(200);
    let accessor =
        MockAccessor::new().with_entry("k", false, Some(FileInfo::new(1, read, write)));
    let strategy = ReaperHaunterStrategy::new(RecordingReaper::new(
        FIVE_MINUTES,
        move |key: &str, last_read, last_write| {
            key == "k" && last_read == read && last_write == write
        },
    ));

    strategy.haunt(&accessor);

    assert_eq!(accessor.removed(), keys(&["k"]));
}

#[test]
fn test_lru_strategy_removes_in_policy_order() {
    let accessor = MockAccessor::new();
    let strategy = LruHaunterStrategy::new(FixedScrub {
        keys: keys(&["k1", "k2", "k3"]),
        period: Duration::from_secs(1),
    });

    strategy.haunt(&accessor);

    assert_eq!(accessor.removed(), keys(&["k1", "k2", "k3"]));
}

#[test]
fn test_lru_strategy_continues_after_failed_removal() {
    let accessor = MockAccessor::new().with_failing_removal("k2");
    let strategy = LruHaunterStrategy::new(FixedScrub {
        keys: keys(&["k1", "k2", "k3"]),
        period: Duration::from_secs(1),
    });

    strategy.haunt(&accessor);

    assert_eq!(accessor.removed(), keys(&["k1", "k2", "k3"]));
    assert_eq!(accessor.failed(), keys(&["k2"]));
}

#[test]
fn test_reaper_strategy_continues_after_failed_removal() {
    let accessor = MockAccessor::new()
        .with_idle("k1", 1, 10 * 60)
        .with_idle("k2", 1, 10 * 60)
        .with_idle("k3", 1, 10 * 60)
        .with_failing_removal("k2");
    let strategy = ReaperHaunterStrategy::new(ReaperPolicy::new(FIVE_MINUTES, FIVE_MINUTES));

    strategy.haunt(&accessor);

    assert_eq!(accessor.removed(), keys(&["k1", "k2", "k3"]));
    assert_eq!(accessor.failed(), keys(&["k2"]));
}

#[test]
fn test_lru_strategy_does_not_filter_in_use() {
    // The scrub policy owns in-use exclusion; the strategy forwards its batch
    let accessor = MockAccessor::new().with_entry("busy", true, None);
    let strategy = LruHaunterStrategy::new(FixedScrub {
        keys: keys(&["busy"]),
        period: Duration::from_secs(1),
    });

    strategy.haunt(&accessor);

    assert_eq!(accessor.removed(), keys(&["busy"]));
}

#[test]
fn test_next_forwards_policy_delay() {
    let lru = new_lru_haunter_strategy(FixedScrub {
        keys: Vec::new(),
        period: Duration::from_millis(1234),
    });
    let reaper = new_reaper_haunter_strategy(ReaperPolicy::new(
        FIVE_MINUTES,
        Duration::from_secs(42),
    ));

    assert_eq!(lru.next(), Duration::from_millis(1234));
    assert_eq!(reaper.next(), Duration::from_secs(42));
}

#[test]
fn test_heterogeneous_haunters_share_one_contract() {
    let accessor = MockAccessor::new()
        .with_idle("old", 10, 60 * 60)
        .with_idle("new", 10, 1);
    let haunters: Vec<Box<dyn Haunter>> = vec![
        new_reaper_haunter_strategy(ReaperPolicy::new(FIVE_MINUTES, FIVE_MINUTES)),
        new_lru_haunter_strategy(FixedScrub {
            keys: keys(&["new"]),
            period: FIVE_MINUTES,
        }),
    ];

    for haunter in &haunters {
        haunter.haunt(&accessor);
    }

    assert_eq!(accessor.removed(), keys(&["old", "new"]));
}

proptest! {
    #[test]
    fn test_reaper_pass_respects_liveness_and_visits_each_entry_once(
        entries in prop::collection::vec((any::<bool>(), any::<bool>()), 0..40)
    ) {
        let mut accessor = MockAccessor::new();
        for (i, (in_use, readable)) in entries.iter().enumerate() {
            let key = format!("key-{i}");
            let at = ago(60 * 60);
            let info = readable.then(|| FileInfo::new(1, at, at));
            accessor = accessor.with_entry(&key, *in_use, info);
        }
        let strategy = ReaperHaunterStrategy::new(RecordingReaper::new(
            FIVE_MINUTES,
            |_: &str, _, _| true,
        ));

        strategy.haunt(&accessor);

        let expected: Vec<String> = entries
            .iter()
            .enumerate()
            .filter(|(_, (in_use, readable))| !*in_use && *readable)
            .map(|(i, _)| format!("key-{i}"))
            .collect();
        let all: Vec<String> = (0..entries.len()).map(|i| format!("key-{i}")).collect();

        prop_assert_eq!(accessor.removed(), expected);
        prop_assert_eq!(accessor.visited(), all);
    }

    #[test]
    fn test_lru_strategy_removes_each_key_once_in_order(
        batch in prop::collection::vec("[a-z]{1,8}", 0..20)
    ) {
        let accessor = MockAccessor::new();
        let strategy = LruHaunterStrategy::new(FixedScrub {
            keys: batch.clone(),
            period: Duration::from_secs(1),
        });

        strategy.haunt(&accessor);

        prop_assert_eq!(accessor.removed(), batch);
    }
}
