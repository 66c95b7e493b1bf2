use super::{height_writer::HeightWriter, ConfirmationHeightConfig, PendingConfirmations};
use crate::{consensus::ActiveElections, stats::Stats};
use std::{
    collections::{hash_map::Entry, HashMap, VecDeque},
    sync::atomic::{AtomicBool, Ordering},
};
use strata_core::{Account, BlockHash};
use strata_ledger::Ledger;
use strata_store::ReadTransaction;
use tracing::{error, warn};

/// A buffered confirmation height raise, ready to be written
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct ConfHeightUpdate {
    pub account: Account,
    /// Block sitting at `height` on the account's chain
    pub hash: BlockHash,
    pub height: u64,
    /// Delta over the height persisted at the time this was buffered
    pub num_blocks_confirmed: u64,
}

/// A receive block whose source chain still has to be confirmed
#[derive(Clone, Debug)]
struct ReceiveDetails {
    account: Account,
    hash: BlockHash,
    height: u64,
    /// Back-filled while collecting; covers the blocks between this receive
    /// and the next one further down the chain
    num_blocks_confirmed: Option<u64>,
}

struct ReceiveSourcePair {
    receive: ReceiveDetails,
    source_hash: BlockHash,
}

/// Highest heights already handled for an account within one traversal.
/// Confirmed means an update was buffered, iterated means the chain was
/// walked; iterated can run ahead of confirmed while sources are still
/// outstanding.
struct ConfirmedIteratedPair {
    confirmed_height: u64,
    iterated_height: u64,
}

/// Walks predecessor and source chains for one finalized block, buffering
/// height raises and flushing them in batches. Owned by the worker thread
/// for the duration of a single submission.
pub(super) struct Traversal<'a> {
    ledger: &'a Ledger,
    stats: &'a Stats,
    active: &'a dyn ActiveElections,
    pending: &'a PendingConfirmations,
    stopped: &'a AtomicBool,
    config: &'a ConfirmationHeightConfig,
    receive_source_pairs: Vec<ReceiveSourcePair>,
    confirmed_iterated: HashMap<Account, ConfirmedIteratedPair>,
    pending_writes: VecDeque<ConfHeightUpdate>,
}

impl<'a> Traversal<'a> {
    pub(super) fn new(
        ledger: &'a Ledger,
        stats: &'a Stats,
        active: &'a dyn ActiveElections,
        pending: &'a PendingConfirmations,
        stopped: &'a AtomicBool,
        config: &'a ConfirmationHeightConfig,
    ) -> Self {
        Self {
            ledger,
            stats,
            active,
            pending,
            stopped,
            config,
            receive_source_pairs: Vec::new(),
            confirmed_iterated: HashMap::new(),
            pending_writes: VecDeque::new(),
        }
    }

    /// Confirms `original_hash`, everything below it on its chain, and the
    /// source chains of every receive found along the way. Writes go out
    /// from the ground upwards so persisted heights never skip a block.
    pub(super) fn run(&mut self, original_hash: BlockHash) {
        let mut receive_details: Option<ReceiveDetails> = None;
        let mut current = original_hash;
        let mut txn = self.ledger.read_txn();

        loop {
            if let Some(pair) = self.receive_source_pairs.last() {
                receive_details = Some(pair.receive.clone());
                current = pair.source_hash;
            } else if receive_details.take().is_some() {
                // Final pass, back on the originally submitted chain. The
                // blocks below the original hash and the first receive still
                // need to be confirmed.
                current = original_hash;
            }

            let Some(block) = self.ledger.get_block(&txn, &current) else {
                error!(
                    "ledger mismatch trying to set confirmation height for block {}",
                    current
                );
                panic!(
                    "ledger mismatch trying to set confirmation height for block {}",
                    current
                );
            };
            let account = block.account();
            let block_height = block.height();
            let Some(info) = self.ledger.account_info(&txn, &account) else {
                error!("account {} missing from the store", account);
                panic!("account {} missing from the store", account);
            };

            let mut confirmation_height = info.confirmation_height;
            let mut iterated_height = confirmation_height;
            if let Some(found) = self.confirmed_iterated.get(&account) {
                if found.confirmed_height > confirmation_height {
                    confirmation_height = found.confirmed_height;
                    iterated_height = confirmation_height;
                }
                if found.iterated_height > iterated_height {
                    iterated_height = found.iterated_height;
                }
            }

            let count_before_receive = self.receive_source_pairs.len();
            if block_height > iterated_height {
                if block_height - iterated_height > self.config.oversized_chain_log_threshold {
                    warn!(
                        "iterating over a long account chain to raise its confirmation height, top block {}",
                        current
                    );
                }
                self.collect_unconfirmed_receives(
                    block_height,
                    iterated_height,
                    current,
                    account,
                    &mut txn,
                );
            }

            // The read transaction is not needed across the write below
            txn.reset();

            // If the chain above iterated_height held no receive with an
            // unconfirmed source, this account and the receive waiting on it
            // can be confirmed now. Otherwise only remember how far we got.
            let confirmed_receives_pending =
                count_before_receive != self.receive_source_pairs.len();
            if !confirmed_receives_pending {
                self.buffer_ready_updates(
                    account,
                    current,
                    block_height,
                    confirmation_height,
                    iterated_height,
                    receive_details.as_ref(),
                );
                self.receive_source_pairs.pop();
            } else if block_height > iterated_height {
                match self.confirmed_iterated.entry(account) {
                    Entry::Occupied(mut entry) => {
                        entry.get_mut().iterated_height = block_height;
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(ConfirmedIteratedPair {
                            confirmed_height: confirmation_height,
                            iterated_height: block_height,
                        });
                    }
                }
            }

            let flush = (self.pending_writes.len() >= self.config.batch_write_size
                || self.receive_source_pairs.is_empty())
                && !self.pending_writes.is_empty();
            if flush {
                let writer =
                    HeightWriter::new(self.ledger, self.stats, self.stopped, self.config);
                if writer.write(&mut self.pending_writes).is_err() {
                    // The store changed underneath us. Drop the rest of this
                    // submission; queued submissions are unaffected.
                    self.receive_source_pairs.clear();
                    break;
                }
            }

            // Bail out without finishing the traversal, otherwise a long
            // chain keeps the worker alive long after a shutdown request
            if self.stopped.load(Ordering::SeqCst) {
                break;
            }

            if self.receive_source_pairs.is_empty() && current == original_hash {
                break;
            }
            txn.renew();
        }
    }

    /// Follows previous pointers from `top_hash` down to the already
    /// iterated region, notifying elections for every visited block and
    /// stacking a receive/source pair for every block that references an
    /// existing source. Deltas between stacked receives are back-filled so
    /// that each receive accounts for the blocks down to the next one.
    fn collect_unconfirmed_receives(
        &mut self,
        block_height: u64,
        iterated_height: u64,
        top_hash: BlockHash,
        account: Account,
        txn: &mut ReadTransaction,
    ) {
        let mut hash = top_hash;
        let mut num_to_confirm = block_height - iterated_height;
        let mut next_height = None;
        let mut pushed = 0usize;

        while num_to_confirm > 0 && !hash.is_zero() {
            let Some(block) = self.ledger.get_block(txn, &hash) else {
                break;
            };

            if !self.pending.is_processing(&hash) {
                self.active.confirm_block(txn, &block);
            }

            let source = block.source_or_link();
            if !source.is_zero()
                && source != self.ledger.constants.epoch_link
                && self.ledger.source_exists(txn, &source)
            {
                let height = iterated_height + num_to_confirm;
                if let Some(next) = next_height {
                    self.receive_source_pairs
                        .last_mut()
                        .unwrap()
                        .receive
                        .num_blocks_confirmed = Some(next - height);
                }
                self.receive_source_pairs.push(ReceiveSourcePair {
                    receive: ReceiveDetails {
                        account,
                        hash,
                        height,
                        num_blocks_confirmed: None,
                    },
                    source_hash: source,
                });
                pushed += 1;
                next_height = Some(height);
            }

            hash = block.previous();

            // Very long chains must not pin one read transaction
            if num_to_confirm % self.config.batch_read_size == 0 {
                txn.refresh();
            }
            if self.stopped.load(Ordering::SeqCst) {
                break;
            }
            num_to_confirm -= 1;
        }

        // The deepest receive covers the remaining blocks down to the
        // already iterated region
        if pushed > 0 {
            let last = self.receive_source_pairs.last_mut().unwrap();
            last.receive.num_blocks_confirmed = Some(last.receive.height - iterated_height);
        }
    }

    /// Buffers the height raise for a fully walked account and, when one is
    /// waiting, for the receive block whose source has just been dealt with
    fn buffer_ready_updates(
        &mut self,
        account: Account,
        current: BlockHash,
        block_height: u64,
        confirmation_height: u64,
        iterated_height: u64,
        receive_details: Option<&ReceiveDetails>,
    ) {
        if block_height > confirmation_height {
            match self.confirmed_iterated.entry(account) {
                Entry::Occupied(mut entry) => {
                    let pair = entry.get_mut();
                    pair.confirmed_height = block_height;
                    if block_height > iterated_height {
                        pair.iterated_height = block_height;
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(ConfirmedIteratedPair {
                        confirmed_height: block_height,
                        iterated_height: block_height,
                    });
                }
            }
            self.pending_writes.push_back(ConfHeightUpdate {
                account,
                hash: current,
                height: block_height,
                num_blocks_confirmed: block_height - confirmation_height,
            });
        }

        if let Some(receive) = receive_details {
            let mut receive = receive.clone();
            match self.confirmed_iterated.entry(receive.account) {
                Entry::Occupied(mut entry) => {
                    // Blocks below the height already handled for this
                    // account must not be counted again
                    let pair = entry.get_mut();
                    let current_height = pair.confirmed_height;
                    pair.confirmed_height = receive.height;
                    receive.num_blocks_confirmed = Some(receive.height - current_height);
                }
                Entry::Vacant(entry) => {
                    entry.insert(ConfirmedIteratedPair {
                        confirmed_height: receive.height,
                        iterated_height: receive.height,
                    });
                }
            }
            self.pending_writes.push_back(ConfHeightUpdate {
                account: receive.account,
                hash: receive.hash,
                height: receive.height,
                num_blocks_confirmed: receive
                    .num_blocks_confirmed
                    .expect("receive delta is set while collecting"),
            });
        }
    }
}
