mod account_store;
mod block_store;
mod transaction;

pub use account_store::AccountStore;
pub use block_store::BlockStore;
pub use transaction::{ReadTransaction, Transaction, WriteTransaction};

use std::sync::Mutex;

/// In-memory ledger store exposing the transaction surface of the on-disk
/// one. Write transactions are exclusive; read operations work under either
/// transaction kind.
pub struct Store {
    pub block: BlockStore,
    pub account: AccountStore,
    write_lock: Mutex<()>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            block: BlockStore::new(),
            account: AccountStore::new(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn tx_begin_read(&self) -> ReadTransaction {
        ReadTransaction::new()
    }

    pub fn tx_begin_write(&self) -> WriteTransaction<'_> {
        WriteTransaction::new(&self.write_lock)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{AccountChain, Account, AccountInfo};

    #[test]
    fn put_get_del_block() {
        let store = Store::new();
        let mut chain = AccountChain::new();
        let hash = chain.add_open();

        let mut txn = store.tx_begin_write();
        store.block.put(&mut txn, chain.block(1));
        drop(txn);

        let txn = store.tx_begin_read();
        assert_eq!(store.block.count(&txn), 1);
        assert_eq!(store.block.get(&txn, &hash).unwrap().hash(), hash);
        assert!(store.block.exists(&txn, &hash));
        drop(txn);

        let mut txn = store.tx_begin_write();
        store.block.del(&mut txn, &hash);
        assert!(!store.block.exists(&txn, &hash));
    }

    #[test]
    fn put_get_account() {
        let store = Store::new();
        let account = Account::from(1);
        let info = AccountInfo {
            block_count: 3,
            confirmation_height: 1,
            ..Default::default()
        };

        let mut txn = store.tx_begin_write();
        store.account.put(&mut txn, &account, &info);
        assert_eq!(store.account.get(&txn, &account), Some(info));
        assert_eq!(store.account.get(&txn, &Account::from(2)), None);
        assert_eq!(store.account.count(&txn), 1);
    }
}
