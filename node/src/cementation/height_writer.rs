use super::{traversal::ConfHeightUpdate, ConfirmationHeightConfig};
use crate::stats::{DetailType, Direction, StatType, Stats};
use anyhow::bail;
use std::{
    collections::VecDeque,
    sync::atomic::{AtomicBool, Ordering},
};
use strata_ledger::Ledger;
use tracing::{debug, error};

/// Commits buffered confirmation height raises in bounded write
/// transactions
pub(super) struct HeightWriter<'a> {
    ledger: &'a Ledger,
    stats: &'a Stats,
    stopped: &'a AtomicBool,
    config: &'a ConfirmationHeightConfig,
}

impl<'a> HeightWriter<'a> {
    pub(super) fn new(
        ledger: &'a Ledger,
        stats: &'a Stats,
        stopped: &'a AtomicBool,
        config: &'a ConfirmationHeightConfig,
    ) -> Self {
        Self {
            ledger,
            stats,
            stopped,
            config,
        }
    }

    /// Drains `updates` front to back, validating each against the current
    /// persisted state. An error means an update referenced a block that is
    /// gone from the store; the caller abandons the submission it was
    /// working on. A raised stop flag empties the buffer without error.
    pub(super) fn write(&self, updates: &mut VecDeque<ConfHeightUpdate>) -> anyhow::Result<()> {
        let total_blocks: u64 = updates.iter().map(|u| u.num_blocks_confirmed).sum();
        debug!(
            "writing {} confirmation height updates ({} blocks)",
            updates.len(),
            total_blocks
        );

        let mut txn = self.ledger.rw_txn();
        let mut accounts_in_txn = 0;
        while let Some(update) = updates.front().cloned() {
            let Some(mut info) = self.ledger.account_info(&txn, &update.account) else {
                error!(
                    "account {} missing while writing confirmation height",
                    update.account
                );
                panic!(
                    "account {} missing while writing confirmation height",
                    update.account
                );
            };

            if update.height > info.confirmation_height {
                // The store can change outside this processor, so make sure
                // the block is still there before committing to its height
                if !self.ledger.block_exists(&txn, &update.hash) {
                    error!(
                        "failed to write confirmation height for block {}",
                        update.hash
                    );
                    self.stats
                        .inc(StatType::ConfirmationHeight, DetailType::InvalidBlock);
                    bail!("block {} is gone from the store", update.hash);
                }
                debug_assert_eq!(
                    update.num_blocks_confirmed,
                    update.height - info.confirmation_height
                );

                // Raise the height in bounded slices so a very long chain
                // never pins the write lock
                while info.confirmation_height < update.height {
                    let step = std::cmp::min(
                        self.config.batch_write_size as u64,
                        update.height - info.confirmation_height,
                    );
                    info.confirmation_height += step;
                    self.ledger.store.account.put(&mut txn, &update.account, &info);
                    self.ledger
                        .cache
                        .cemented_count
                        .fetch_add(step, Ordering::SeqCst);
                    self.stats.add_dir(
                        StatType::ConfirmationHeight,
                        DetailType::BlocksConfirmed,
                        Direction::In,
                        step,
                    );

                    if info.confirmation_height < update.height {
                        txn.refresh();
                        if self.stopped.load(Ordering::SeqCst) {
                            updates.clear();
                            return Ok(());
                        }
                    }
                }
            }

            updates.pop_front();
            accounts_in_txn += 1;
            if accounts_in_txn >= self.config.batch_write_size && !updates.is_empty() {
                // Commit periodically to cap write lock hold time
                txn.refresh();
                accounts_in_txn = 0;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::AccountChain;
    use strata_ledger::Ledger;

    fn update_for(chain: &AccountChain, delta: u64) -> ConfHeightUpdate {
        ConfHeightUpdate {
            account: chain.account(),
            hash: chain.frontier(),
            height: chain.height(),
            num_blocks_confirmed: delta,
        }
    }

    fn blocks_confirmed(stats: &Stats) -> u64 {
        stats.count(
            StatType::ConfirmationHeight,
            DetailType::BlocksConfirmed,
            Direction::In,
        )
    }

    #[test]
    fn writes_a_single_update() {
        let mut chain = AccountChain::new();
        chain.add_open();
        chain.add_sends(2);
        let ledger = Ledger::builder().chain(&chain).finish();
        let stats = Stats::new();
        let stopped = AtomicBool::new(false);
        let config = ConfirmationHeightConfig::default();

        let mut updates = VecDeque::from([update_for(&chain, 3)]);
        HeightWriter::new(&ledger, &stats, &stopped, &config)
            .write(&mut updates)
            .unwrap();

        assert!(updates.is_empty());
        let txn = ledger.read_txn();
        assert_eq!(ledger.confirmation_height(&txn, &chain.account()), 3);
        assert_eq!(blocks_confirmed(&stats), 3);
        assert_eq!(ledger.cache.cemented_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn missing_block_aborts_without_partial_updates() {
        let mut chain = AccountChain::new();
        chain.add_open();
        chain.add_sends(4);
        let ledger = Ledger::builder().chain(&chain).finish();
        let stats = Stats::new();
        let stopped = AtomicBool::new(false);
        let config = ConfirmationHeightConfig::default();

        // The buffered block disappears before the write happens
        {
            let mut txn = ledger.rw_txn();
            ledger.store.block.del(&mut txn, &chain.frontier());
        }

        let mut updates = VecDeque::from([update_for(&chain, 5)]);
        let result =
            HeightWriter::new(&ledger, &stats, &stopped, &config).write(&mut updates);

        assert!(result.is_err());
        let txn = ledger.read_txn();
        assert_eq!(ledger.confirmation_height(&txn, &chain.account()), 0);
        assert_eq!(
            stats.count(
                StatType::ConfirmationHeight,
                DetailType::InvalidBlock,
                Direction::In
            ),
            1
        );
        assert_eq!(blocks_confirmed(&stats), 0);
    }

    #[test]
    fn earlier_updates_survive_a_later_missing_block() {
        let mut intact = AccountChain::new();
        intact.add_open();
        intact.add_sends(1);

        let mut broken = AccountChain::new();
        broken.add_open();
        broken.add_sends(1);

        let ledger = Ledger::builder().chain(&intact).chain(&broken).finish();
        let stats = Stats::new();
        let stopped = AtomicBool::new(false);
        let config = ConfirmationHeightConfig::default();

        {
            let mut txn = ledger.rw_txn();
            ledger.store.block.del(&mut txn, &broken.frontier());
        }

        let mut updates = VecDeque::from([update_for(&intact, 2), update_for(&broken, 2)]);
        let result =
            HeightWriter::new(&ledger, &stats, &stopped, &config).write(&mut updates);

        assert!(result.is_err());
        let txn = ledger.read_txn();
        assert_eq!(ledger.confirmation_height(&txn, &intact.account()), 2);
        assert_eq!(ledger.confirmation_height(&txn, &broken.account()), 0);
        assert_eq!(blocks_confirmed(&stats), 2);
    }

    #[test]
    fn stale_update_is_skipped() {
        let mut chain = AccountChain::new();
        chain.add_open();
        chain.add_sends(4);
        let ledger = Ledger::builder()
            .chain(&chain)
            .confirmation_height(chain.account(), 5)
            .finish();
        let stats = Stats::new();
        let stopped = AtomicBool::new(false);
        let config = ConfirmationHeightConfig::default();

        let mut updates = VecDeque::from([ConfHeightUpdate {
            account: chain.account(),
            hash: chain.block(3).hash(),
            height: 3,
            num_blocks_confirmed: 3,
        }]);
        HeightWriter::new(&ledger, &stats, &stopped, &config)
            .write(&mut updates)
            .unwrap();

        assert!(updates.is_empty());
        let txn = ledger.read_txn();
        assert_eq!(ledger.confirmation_height(&txn, &chain.account()), 5);
        assert_eq!(blocks_confirmed(&stats), 0);
    }

    #[test]
    fn stop_between_slices_leaves_a_batch_multiple() {
        let mut chain = AccountChain::new();
        chain.add_open();
        chain.add_sends(24);
        let ledger = Ledger::builder().chain(&chain).finish();
        let stats = Stats::new();
        // Raised before the call; the writer notices at the first slice
        // boundary and gives up cleanly
        let stopped = AtomicBool::new(true);
        let config = ConfirmationHeightConfig {
            batch_write_size: 10,
            ..Default::default()
        };

        let mut updates = VecDeque::from([update_for(&chain, 25)]);
        HeightWriter::new(&ledger, &stats, &stopped, &config)
            .write(&mut updates)
            .unwrap();

        assert!(updates.is_empty());
        let txn = ledger.read_txn();
        assert_eq!(ledger.confirmation_height(&txn, &chain.account()), 10);
        assert_eq!(blocks_confirmed(&stats), 10);
    }

    #[test]
    fn long_chain_is_written_in_slices() {
        let mut chain = AccountChain::new();
        chain.add_open();
        chain.add_sends(24);
        let ledger = Ledger::builder().chain(&chain).finish();
        let stats = Stats::new();
        let stopped = AtomicBool::new(false);
        let config = ConfirmationHeightConfig {
            batch_write_size: 10,
            ..Default::default()
        };

        let mut updates = VecDeque::from([update_for(&chain, 25)]);
        HeightWriter::new(&ledger, &stats, &stopped, &config)
            .write(&mut updates)
            .unwrap();

        let txn = ledger.read_txn();
        assert_eq!(ledger.confirmation_height(&txn, &chain.account()), 25);
        assert_eq!(blocks_confirmed(&stats), 25);
    }
}
