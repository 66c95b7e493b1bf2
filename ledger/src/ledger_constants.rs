use strata_core::{epoch_link_v1, BlockHash};

/// Protocol constants the ledger is parameterized with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerConstants {
    /// Sentinel found in the link field of protocol upgrade blocks. Never a
    /// real source, so chain walks must not descend into it.
    pub epoch_link: BlockHash,
}

impl Default for LedgerConstants {
    fn default() -> Self {
        Self {
            epoch_link: epoch_link_v1().into(),
        }
    }
}
