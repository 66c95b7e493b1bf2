use crate::{Account, BlockHash, BlockHashBuilder};

/// First block of an account chain. Credits the funds sent by `source`;
/// a zero source marks a genesis style open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenBlock {
    pub source: BlockHash,
    pub account: Account,
}

impl OpenBlock {
    pub fn hash(&self) -> BlockHash {
        BlockHashBuilder::new()
            .update(self.source.as_bytes())
            .update(self.account.as_bytes())
            .build()
    }
}
