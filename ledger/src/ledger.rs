use crate::{LedgerBuilder, LedgerCache, LedgerConstants};
use strata_core::{Account, AccountInfo, BlockHash, SavedBlock};
use strata_store::{ReadTransaction, Store, Transaction, WriteTransaction};

/// Read and write access to the block lattice
pub struct Ledger {
    pub store: Store,
    pub cache: LedgerCache,
    pub constants: LedgerConstants,
}

impl Ledger {
    pub fn new() -> Self {
        Self::builder().finish()
    }

    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::new()
    }

    pub fn read_txn(&self) -> ReadTransaction {
        self.store.tx_begin_read()
    }

    pub fn rw_txn(&self) -> WriteTransaction<'_> {
        self.store.tx_begin_write()
    }

    pub fn get_block(&self, txn: &dyn Transaction, hash: &BlockHash) -> Option<SavedBlock> {
        self.store.block.get(txn, hash)
    }

    pub fn block_exists(&self, txn: &dyn Transaction, hash: &BlockHash) -> bool {
        self.store.block.exists(txn, hash)
    }

    pub fn account_info(&self, txn: &dyn Transaction, account: &Account) -> Option<AccountInfo> {
        self.store.account.get(txn, account)
    }

    /// 0 for unknown accounts
    pub fn confirmation_height(&self, txn: &dyn Transaction, account: &Account) -> u64 {
        self.account_info(txn, account)
            .map(|info| info.confirmation_height)
            .unwrap_or_default()
    }

    /// True when `source` refers to a block present in the store
    pub fn source_exists(&self, txn: &dyn Transaction, source: &BlockHash) -> bool {
        self.store.block.exists(txn, source)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
