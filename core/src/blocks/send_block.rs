use crate::{Account, Amount, BlockHash, BlockHashBuilder};

/// Debits funds. The hash of a send becomes the source of the matching
/// receive on the destination account's chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendBlock {
    pub previous: BlockHash,
    pub destination: Account,
    pub balance: Amount,
}

impl SendBlock {
    pub fn hash(&self) -> BlockHash {
        BlockHashBuilder::new()
            .update(self.previous.as_bytes())
            .update(self.destination.as_bytes())
            .update(self.balance.to_be_bytes())
            .build()
    }
}
