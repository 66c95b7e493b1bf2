/// Primary statistics type
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum StatType {
    ConfirmationHeight,
}

impl StatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatType::ConfirmationHeight => "confirmation_height",
        }
    }
}

/// Optional detail type
#[repr(u16)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum DetailType {
    BlocksConfirmed,
    InvalidBlock,
}

impl DetailType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailType::BlocksConfirmed => "blocks_confirmed",
            DetailType::InvalidBlock => "invalid_block",
        }
    }
}

/// Direction of a stat
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}
