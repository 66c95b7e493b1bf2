use crate::{Account, Amount, BlockHash, BlockHashBuilder, Link};

/// Unified block format. The link field encodes either a source hash
/// (receive), a destination account (send) or an epoch marker; which one it
/// is follows from context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateBlock {
    pub account: Account,
    pub previous: BlockHash,
    pub balance: Amount,
    pub link: Link,
}

impl StateBlock {
    pub fn hash(&self) -> BlockHash {
        BlockHashBuilder::new()
            .update(self.account.as_bytes())
            .update(self.previous.as_bytes())
            .update(self.balance.to_be_bytes())
            .update(self.link.as_bytes())
            .build()
    }
}
