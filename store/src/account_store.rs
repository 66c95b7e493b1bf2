use crate::{Transaction, WriteTransaction};
use std::{collections::HashMap, sync::RwLock};
use strata_core::{Account, AccountInfo};

/// Account records keyed by account
pub struct AccountStore {
    table: RwLock<HashMap<Account, AccountInfo>>,
}

impl AccountStore {
    pub(crate) fn new() -> Self {
        Self {
            table: RwLock::new(HashMap::new()),
        }
    }

    pub fn put(&self, _txn: &mut WriteTransaction, account: &Account, info: &AccountInfo) {
        self.table.write().unwrap().insert(*account, info.clone());
    }

    pub fn get(&self, _txn: &dyn Transaction, account: &Account) -> Option<AccountInfo> {
        self.table.read().unwrap().get(account).cloned()
    }

    pub fn del(&self, _txn: &mut WriteTransaction, account: &Account) {
        self.table.write().unwrap().remove(account);
    }

    pub fn count(&self, _txn: &dyn Transaction) -> u64 {
        self.table.read().unwrap().len() as u64
    }
}
