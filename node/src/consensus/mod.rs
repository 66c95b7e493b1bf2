use strata_core::SavedBlock;
use strata_store::ReadTransaction;

/// Seam to the election subsystem. The confirmation height worker reports
/// every block it walks so open elections can settle without waiting for
/// further votes.
pub trait ActiveElections: Send + Sync {
    /// Idempotent. May be called repeatedly for the same block and
    /// concurrently with election activity on other blocks; must only read
    /// from the store under the given transaction.
    fn confirm_block(&self, txn: &ReadTransaction, block: &SavedBlock);
}

/// Elections sink that ignores every notification
pub struct NullActiveElections;

impl ActiveElections for NullActiveElections {
    fn confirm_block(&self, _txn: &ReadTransaction, _block: &SavedBlock) {}
}
