mod stats_enums;
pub use stats_enums::{DetailType, Direction, StatType};

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        RwLock,
    },
};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct CounterKey {
    stat_type: StatType,
    detail: DetailType,
    dir: Direction,
}

#[derive(Default)]
struct CounterEntry(AtomicU64);

impl CounterEntry {
    fn add(&self, value: u64) {
        self.0.fetch_add(value, Ordering::SeqCst);
    }
}

/// Collects runtime counters
#[derive(Default)]
pub struct Stats {
    counters: RwLock<BTreeMap<CounterKey, CounterEntry>>,
}

impl Stats {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add 1 to the given counter
    pub fn inc(&self, stat_type: StatType, detail: DetailType) {
        self.add_dir(stat_type, detail, Direction::In, 1)
    }

    /// Add `value` to the given counter
    pub fn add(&self, stat_type: StatType, detail: DetailType, value: u64) {
        self.add_dir(stat_type, detail, Direction::In, value)
    }

    pub fn add_dir(&self, stat_type: StatType, detail: DetailType, dir: Direction, value: u64) {
        if value == 0 {
            return;
        }

        let key = CounterKey {
            stat_type,
            detail,
            dir,
        };

        // Two-step to avoid exclusively locking in the common case
        {
            let lock = self.counters.read().unwrap();
            if let Some(counter) = lock.get(&key) {
                counter.add(value);
                return;
            }
        }
        let mut lock = self.counters.write().unwrap();
        lock.entry(key).or_default().add(value);
    }

    /// Current value of the given counter
    pub fn count(&self, stat_type: StatType, detail: DetailType, dir: Direction) -> u64 {
        let key = CounterKey {
            stat_type,
            detail,
            dir,
        };
        self.counters
            .read()
            .unwrap()
            .get(&key)
            .map(|counter| counter.0.load(Ordering::SeqCst))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let stats = Stats::new();
        assert_eq!(
            stats.count(
                StatType::ConfirmationHeight,
                DetailType::BlocksConfirmed,
                Direction::In
            ),
            0
        );
    }

    #[test]
    fn inc_and_add() {
        let stats = Stats::new();
        stats.inc(StatType::ConfirmationHeight, DetailType::InvalidBlock);
        stats.add_dir(
            StatType::ConfirmationHeight,
            DetailType::BlocksConfirmed,
            Direction::In,
            5,
        );
        stats.add(StatType::ConfirmationHeight, DetailType::BlocksConfirmed, 2);
        assert_eq!(
            stats.count(
                StatType::ConfirmationHeight,
                DetailType::InvalidBlock,
                Direction::In
            ),
            1
        );
        assert_eq!(
            stats.count(
                StatType::ConfirmationHeight,
                DetailType::BlocksConfirmed,
                Direction::In
            ),
            7
        );
    }

    #[test]
    fn zero_is_not_recorded() {
        let stats = Stats::new();
        stats.add(StatType::ConfirmationHeight, DetailType::BlocksConfirmed, 0);
        assert!(stats.counters.read().unwrap().is_empty());
    }

    #[test]
    fn enum_names() {
        assert_eq!(StatType::ConfirmationHeight.as_str(), "confirmation_height");
        assert_eq!(DetailType::BlocksConfirmed.as_str(), "blocks_confirmed");
        assert_eq!(DetailType::InvalidBlock.as_str(), "invalid_block");
        assert_eq!(Direction::In.as_str(), "in");
        assert_eq!(Direction::Out.as_str(), "out");
    }
}
