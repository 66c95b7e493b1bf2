use std::{
    collections::HashSet,
    mem::size_of,
    sync::{atomic::AtomicBool, atomic::Ordering, Condvar, Mutex},
};
use strata_core::{utils::ContainerInfo, BlockHash};

/// Block hashes awaiting confirmation height propagation, plus the hash the
/// worker is currently on. Shared between the worker and any producer that
/// observes a finalized block (elections, RPC, tests). Submissions are
/// unordered; the worker picks an arbitrary element.
pub struct PendingConfirmations {
    mutex: Mutex<PendingSet>,
    condition: Condvar,
}

#[derive(Default)]
struct PendingSet {
    pending: HashSet<BlockHash>,
    current: BlockHash,
}

impl PendingConfirmations {
    pub fn new() -> Self {
        Self {
            mutex: Mutex::new(PendingSet::default()),
            condition: Condvar::new(),
        }
    }

    /// Queues a hash and wakes the worker. Duplicate submissions are no-ops.
    pub fn add(&self, hash: BlockHash) {
        {
            let mut guard = self.mutex.lock().unwrap();
            guard.pending.insert(hash);
        }
        self.condition.notify_all();
    }

    /// Number of queued hashes, excluding the one being processed
    pub fn len(&self) -> usize {
        self.mutex.lock().unwrap().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True while `hash` is queued or currently being processed
    pub fn is_processing(&self, hash: &BlockHash) -> bool {
        let guard = self.mutex.lock().unwrap();
        (!guard.current.is_zero() && guard.current == *hash) || guard.pending.contains(hash)
    }

    /// The hash the worker is on right now, zero when idle
    pub fn current(&self) -> BlockHash {
        self.mutex.lock().unwrap().current
    }

    pub fn container_info(&self) -> ContainerInfo {
        [("pending", self.len(), size_of::<BlockHash>())].into()
    }

    /// Removes an arbitrary queued hash and publishes it as current
    pub(crate) fn next(&self) -> Option<BlockHash> {
        let mut guard = self.mutex.lock().unwrap();
        let hash = *guard.pending.iter().next()?;
        guard.pending.remove(&hash);
        guard.current = hash;
        Some(hash)
    }

    pub(crate) fn finish_current(&self) {
        self.mutex.lock().unwrap().current = BlockHash::zero();
    }

    /// Parks the worker until there is work or `stopped` turns true
    pub(crate) fn wait_for_work(&self, stopped: &AtomicBool) {
        let guard = self.mutex.lock().unwrap();
        let _guard = self
            .condition
            .wait_while(guard, |set| {
                set.pending.is_empty() && !stopped.load(Ordering::SeqCst)
            })
            .unwrap();
    }

    /// Raises the stop flag under the queue lock so a worker about to park
    /// cannot miss the wakeup
    pub(crate) fn signal_stop(&self, stopped: &AtomicBool) {
        {
            let _guard = self.mutex.lock().unwrap();
            stopped.store(true, Ordering::SeqCst);
        }
        self.condition.notify_all();
    }
}

impl Default for PendingConfirmations {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_idle() {
        let pending = PendingConfirmations::new();
        assert_eq!(pending.len(), 0);
        assert!(pending.is_empty());
        assert!(pending.current().is_zero());
        assert!(!pending.is_processing(&BlockHash::from(1)));
        assert_eq!(pending.next(), None);
    }

    #[test]
    fn add_is_idempotent() {
        let pending = PendingConfirmations::new();
        let hash = BlockHash::random();
        pending.add(hash);
        pending.add(hash);
        assert_eq!(pending.len(), 1);
        assert!(pending.is_processing(&hash));
    }

    #[test]
    fn next_publishes_current() {
        let pending = PendingConfirmations::new();
        let hash = BlockHash::random();
        pending.add(hash);

        assert_eq!(pending.next(), Some(hash));
        assert_eq!(pending.len(), 0);
        assert_eq!(pending.current(), hash);
        assert!(pending.is_processing(&hash));

        pending.finish_current();
        assert!(pending.current().is_zero());
        assert!(!pending.is_processing(&hash));
    }

    #[test]
    fn container_info_counts_pending() {
        let pending = PendingConfirmations::new();
        pending.add(BlockHash::random());
        pending.add(BlockHash::random());
        let info = pending.container_info();
        assert_eq!(info.entries()[0].name, "pending");
        assert_eq!(info.entries()[0].count, 2);
    }

    #[test]
    fn signal_stop_wakes_a_parked_worker() {
        use std::sync::Arc;

        let pending = Arc::new(PendingConfirmations::new());
        let stopped = Arc::new(AtomicBool::new(false));
        let pending2 = Arc::clone(&pending);
        let stopped2 = Arc::clone(&stopped);
        let handle = std::thread::spawn(move || {
            pending2.wait_for_work(&stopped2);
        });
        pending.signal_stop(&stopped);
        handle.join().unwrap();
        assert!(stopped.load(Ordering::SeqCst));
    }
}
