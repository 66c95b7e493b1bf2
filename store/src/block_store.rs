use crate::{Transaction, WriteTransaction};
use std::{collections::HashMap, sync::RwLock};
use strata_core::{BlockHash, SavedBlock};

/// Saved blocks keyed by hash
pub struct BlockStore {
    table: RwLock<HashMap<BlockHash, SavedBlock>>,
}

impl BlockStore {
    pub(crate) fn new() -> Self {
        Self {
            table: RwLock::new(HashMap::new()),
        }
    }

    pub fn put(&self, _txn: &mut WriteTransaction, block: &SavedBlock) {
        self.table
            .write()
            .unwrap()
            .insert(block.hash(), block.clone());
    }

    pub fn get(&self, _txn: &dyn Transaction, hash: &BlockHash) -> Option<SavedBlock> {
        self.table.read().unwrap().get(hash).cloned()
    }

    pub fn exists(&self, txn: &dyn Transaction, hash: &BlockHash) -> bool {
        self.get(txn, hash).is_some()
    }

    pub fn del(&self, _txn: &mut WriteTransaction, hash: &BlockHash) {
        self.table.write().unwrap().remove(hash);
    }

    pub fn count(&self, _txn: &dyn Transaction) -> u64 {
        self.table.read().unwrap().len() as u64
    }
}
