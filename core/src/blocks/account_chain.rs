use super::{
    Block, BlockSideband, OpenBlock, ReceiveBlock, SavedBlock, SendBlock, StateBlock,
};
use crate::{Account, Amount, BlockHash, Link};

/// Builds a valid account chain block by block. Used to set up test ledgers.
pub struct AccountChain {
    account: Account,
    balance: Amount,
    blocks: Vec<SavedBlock>,
}

impl AccountChain {
    pub fn new() -> Self {
        Self::with_account(Account::random())
    }

    pub fn with_account(account: Account) -> Self {
        Self {
            account,
            balance: Amount::raw(1_000_000),
            blocks: Vec::new(),
        }
    }

    pub fn account(&self) -> Account {
        self.account
    }

    pub fn height(&self) -> u64 {
        self.blocks.len() as u64
    }

    pub fn frontier(&self) -> BlockHash {
        self.blocks
            .last()
            .map(|b| b.hash())
            .unwrap_or_default()
    }

    pub fn blocks(&self) -> &[SavedBlock] {
        &self.blocks
    }

    /// Block at the given 1-indexed chain position
    pub fn block(&self, height: u64) -> &SavedBlock {
        &self.blocks[height as usize - 1]
    }

    /// Genesis style open block without a source
    pub fn add_open(&mut self) -> BlockHash {
        self.add_open_from(BlockHash::zero())
    }

    pub fn add_open_from(&mut self, source: BlockHash) -> BlockHash {
        assert!(self.blocks.is_empty());
        self.push(Block::Open(OpenBlock {
            source,
            account: self.account,
        }))
    }

    pub fn add_send(&mut self) -> BlockHash {
        self.add_send_to(Account::random())
    }

    pub fn add_send_to(&mut self, destination: Account) -> BlockHash {
        self.balance = self.balance.saturating_sub(Amount::raw(1));
        let previous = self.frontier();
        self.push(Block::Send(SendBlock {
            previous,
            destination,
            balance: self.balance,
        }))
    }

    pub fn add_sends(&mut self, count: usize) {
        for _ in 0..count {
            self.add_send();
        }
    }

    pub fn add_receive(&mut self, source: BlockHash) -> BlockHash {
        self.balance = self.balance.saturating_add(Amount::raw(1));
        let previous = self.frontier();
        self.push(Block::Receive(ReceiveBlock { previous, source }))
    }

    /// State block carrying the current balance. The link decides what the
    /// block means: a source hash, a destination or an epoch marker.
    pub fn add_state(&mut self, link: Link) -> BlockHash {
        let previous = self.frontier();
        self.push(Block::State(StateBlock {
            account: self.account,
            previous,
            balance: self.balance,
            link,
        }))
    }

    fn push(&mut self, block: Block) -> BlockHash {
        assert!(self.blocks.is_empty() == block.is_open());
        let saved = SavedBlock::new(
            block,
            BlockSideband {
                account: self.account,
                height: self.height() + 1,
            },
        );
        let hash = saved.hash();
        self.blocks.push(saved);
        hash
    }
}

impl Default for AccountChain {
    fn default() -> Self {
        Self::new()
    }
}
