#[macro_use]
mod u256_struct;

mod account_info;
pub use account_info::AccountInfo;

mod amount;
pub use amount::Amount;

mod block_hash;
pub use block_hash::{BlockHash, BlockHashBuilder};

mod blocks;
pub use blocks::*;

pub mod utils;

u256_struct!(Account);
u256_struct!(Link);

impl From<Link> for BlockHash {
    fn from(link: Link) -> Self {
        BlockHash::from_bytes(*link.as_bytes())
    }
}

impl From<BlockHash> for Link {
    fn from(hash: BlockHash) -> Self {
        Link::from_bytes(*hash.as_bytes())
    }
}

/// Marker value for the link field of protocol upgrade blocks. A link equal
/// to this sentinel never refers to a source block.
pub fn epoch_link_v1() -> Link {
    let mut link_bytes = [0u8; 32];
    link_bytes[..14].copy_from_slice(b"epoch v1 block");
    Link::from_bytes(link_bytes)
}
