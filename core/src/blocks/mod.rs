mod account_chain;
pub use account_chain::AccountChain;

mod block_sideband;
pub use block_sideband::BlockSideband;

mod open_block;
pub use open_block::OpenBlock;

mod receive_block;
pub use receive_block::ReceiveBlock;

mod send_block;
pub use send_block::SendBlock;

mod state_block;
pub use state_block::StateBlock;

use crate::{Account, Amount, BlockHash, Link};
use std::ops::Deref;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Open(OpenBlock),
    Send(SendBlock),
    Receive(ReceiveBlock),
    State(StateBlock),
}

impl Block {
    pub fn hash(&self) -> BlockHash {
        match self {
            Block::Open(b) => b.hash(),
            Block::Send(b) => b.hash(),
            Block::Receive(b) => b.hash(),
            Block::State(b) => b.hash(),
        }
    }

    /// Zero on the first block of a chain
    pub fn previous(&self) -> BlockHash {
        match self {
            Block::Open(_) => BlockHash::zero(),
            Block::Send(b) => b.previous,
            Block::Receive(b) => b.previous,
            Block::State(b) => b.previous,
        }
    }

    pub fn account_field(&self) -> Option<Account> {
        match self {
            Block::Open(b) => Some(b.account),
            Block::State(b) => Some(b.account),
            _ => None,
        }
    }

    /// Source block for open/receive blocks, `None` otherwise
    pub fn source_field(&self) -> Option<BlockHash> {
        match self {
            Block::Open(b) => Some(b.source),
            Block::Receive(b) => Some(b.source),
            _ => None,
        }
    }

    pub fn link_field(&self) -> Option<Link> {
        match self {
            Block::State(b) => Some(b.link),
            _ => None,
        }
    }

    pub fn balance_field(&self) -> Option<Amount> {
        match self {
            Block::Send(b) => Some(b.balance),
            Block::State(b) => Some(b.balance),
            _ => None,
        }
    }

    /// The explicit source pointer or, when there is none, the link field
    /// reinterpreted as a hash. Zero when the block references no source.
    pub fn source_or_link(&self) -> BlockHash {
        self.source_field()
            .unwrap_or_else(|| self.link_field().unwrap_or_default().into())
    }

    pub fn is_open(&self) -> bool {
        match self {
            Block::Open(_) => true,
            Block::State(state) => state.previous.is_zero(),
            _ => false,
        }
    }
}

/// A block together with the sideband recorded when it was saved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedBlock {
    block: Block,
    sideband: BlockSideband,
}

impl SavedBlock {
    pub fn new(block: Block, sideband: BlockSideband) -> Self {
        Self { block, sideband }
    }

    pub fn account(&self) -> Account {
        match self.block.account_field() {
            Some(account) => account,
            None => self.sideband.account,
        }
    }

    pub fn height(&self) -> u64 {
        self.sideband.height
    }
}

impl Deref for SavedBlock {
    type Target = Block;

    fn deref(&self) -> &Self::Target {
        &self.block
    }
}
