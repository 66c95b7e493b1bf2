use crate::{BlockHash, BlockHashBuilder};

/// Credits the funds debited by the send block at `source`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceiveBlock {
    pub previous: BlockHash,
    pub source: BlockHash,
}

impl ReceiveBlock {
    pub fn hash(&self) -> BlockHash {
        BlockHashBuilder::new()
            .update(self.previous.as_bytes())
            .update(self.source.as_bytes())
            .build()
    }
}
