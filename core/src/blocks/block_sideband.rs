use crate::Account;

/// Contextual details about a block which are only known once the block is
/// saved to the ledger
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockSideband {
    pub account: Account,
    /// 1-indexed position on the owning account's chain
    pub height: u64,
}
