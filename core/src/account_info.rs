use crate::BlockHash;

/// Latest information about an account
#[derive(PartialEq, Eq, Clone, Default, Debug)]
pub struct AccountInfo {
    pub head: BlockHash,
    pub block_count: u64,
    /// Height of the highest block on this account's chain that consensus
    /// has finalized. Never decreases and never exceeds `block_count`.
    pub confirmation_height: u64,
}
