use crate::{Ledger, LedgerCache, LedgerConstants};
use std::{collections::HashMap, sync::atomic::Ordering};
use strata_core::{Account, AccountChain, AccountInfo, BlockHash, SavedBlock};
use strata_store::Store;

/// Seeds a ledger with account chains for tests and tooling
pub struct LedgerBuilder {
    blocks: Vec<SavedBlock>,
    confirmation_heights: Vec<(Account, u64)>,
    constants: LedgerConstants,
}

impl LedgerBuilder {
    pub(crate) fn new() -> Self {
        Self {
            blocks: Vec::new(),
            confirmation_heights: Vec::new(),
            constants: LedgerConstants::default(),
        }
    }

    pub fn chain(mut self, chain: &AccountChain) -> Self {
        self.blocks.extend_from_slice(chain.blocks());
        self
    }

    pub fn confirmation_height(mut self, account: Account, height: u64) -> Self {
        self.confirmation_heights.push((account, height));
        self
    }

    pub fn epoch_link(mut self, epoch_link: BlockHash) -> Self {
        self.constants.epoch_link = epoch_link;
        self
    }

    pub fn finish(self) -> Ledger {
        let store = Store::new();
        let mut infos: HashMap<Account, AccountInfo> = HashMap::new();
        {
            let mut txn = store.tx_begin_write();
            for block in &self.blocks {
                store.block.put(&mut txn, block);
                let info = infos.entry(block.account()).or_default();
                if block.height() > info.block_count {
                    info.block_count = block.height();
                    info.head = block.hash();
                }
            }
            for (account, height) in &self.confirmation_heights {
                infos
                    .get_mut(account)
                    .expect("confirmation height given for an unknown account")
                    .confirmation_height = *height;
            }
            for (account, info) in &infos {
                store.account.put(&mut txn, account, info);
            }
        }

        let cache = LedgerCache::new();
        cache
            .block_count
            .store(self.blocks.len() as u64, Ordering::SeqCst);
        let cemented = infos.values().map(|i| i.confirmation_height).sum();
        cache.cemented_count.store(cemented, Ordering::SeqCst);

        Ledger {
            store,
            cache,
            constants: self.constants,
        }
    }
}
