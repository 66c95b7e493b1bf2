use std::sync::atomic::AtomicU64;

/// Ledger-wide counters kept off the store's hot path
pub struct LedgerCache {
    pub cemented_count: AtomicU64,
    pub block_count: AtomicU64,
}

impl LedgerCache {
    pub fn new() -> Self {
        Self {
            cemented_count: AtomicU64::new(0),
            block_count: AtomicU64::new(0),
        }
    }
}

impl Default for LedgerCache {
    fn default() -> Self {
        Self::new()
    }
}
