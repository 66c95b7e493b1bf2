pub mod cementation;
pub mod consensus;
pub mod stats;
