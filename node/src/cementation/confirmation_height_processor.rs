use super::{traversal::Traversal, ConfirmationHeightConfig, PendingConfirmations};
use crate::{consensus::ActiveElections, stats::Stats};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    thread::JoinHandle,
};
use strata_core::{utils::ContainerInfo, BlockHash};
use strata_ledger::Ledger;

/// Raises per-account confirmation heights for blocks the consensus layer
/// has finalized, following receive sources across accounts. Submitting is
/// fire and forget; outcomes surface through stats and logs.
pub struct ConfirmationHeightProcessor {
    thread: Arc<ProcessorThread>,
    join_handle: Mutex<Option<JoinHandle<()>>>,
}

impl ConfirmationHeightProcessor {
    pub fn new(
        config: ConfirmationHeightConfig,
        ledger: Arc<Ledger>,
        stats: Arc<Stats>,
        active: Arc<dyn ActiveElections>,
        pending: Arc<PendingConfirmations>,
    ) -> Self {
        Self {
            thread: Arc::new(ProcessorThread {
                config,
                ledger,
                stats,
                active,
                pending,
                stopped: AtomicBool::new(false),
            }),
            join_handle: Mutex::new(None),
        }
    }

    pub fn start(&self) {
        debug_assert!(self.join_handle.lock().unwrap().is_none());

        let thread = Arc::clone(&self.thread);
        *self.join_handle.lock().unwrap() = Some(
            std::thread::Builder::new()
                .name("Conf height".to_string())
                .spawn(move || thread.run())
                .unwrap(),
        );
    }

    pub fn stop(&self) {
        self.thread.pending.signal_stop(&self.thread.stopped);
        let handle = self.join_handle.lock().unwrap().take();
        if let Some(handle) = handle {
            handle.join().unwrap();
        }
    }

    /// Queues a finalized block for height propagation
    pub fn add(&self, hash: BlockHash) {
        self.thread.pending.add(hash);
    }

    /// The hash the worker is traversing right now, zero when idle
    pub fn current(&self) -> BlockHash {
        self.thread.pending.current()
    }

    /// Queued submissions, excluding the one being processed
    pub fn awaiting_processing_len(&self) -> usize {
        self.thread.pending.len()
    }

    pub fn container_info(&self) -> ContainerInfo {
        self.thread.pending.container_info()
    }
}

impl Drop for ConfirmationHeightProcessor {
    fn drop(&mut self) {
        self.stop();
    }
}

struct ProcessorThread {
    config: ConfirmationHeightConfig,
    ledger: Arc<Ledger>,
    stats: Arc<Stats>,
    active: Arc<dyn ActiveElections>,
    pending: Arc<PendingConfirmations>,
    stopped: AtomicBool,
}

impl ProcessorThread {
    fn run(&self) {
        while !self.stopped.load(Ordering::SeqCst) {
            if let Some(hash) = self.pending.next() {
                let mut traversal = Traversal::new(
                    &self.ledger,
                    &self.stats,
                    self.active.as_ref(),
                    &self.pending,
                    &self.stopped,
                    &self.config,
                );
                traversal.run(hash);
                self.pending.finish_current();
            } else {
                self.pending.wait_for_work(&self.stopped);
            }
        }
    }
}
