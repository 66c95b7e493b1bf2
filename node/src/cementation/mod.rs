mod confirmation_height_processor;
mod height_writer;
mod pending_confirmations;
mod traversal;

pub use confirmation_height_processor::ConfirmationHeightProcessor;
pub use pending_confirmations::PendingConfirmations;

/// Tunables for the confirmation height processor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationHeightConfig {
    /// Accounts per write transaction. Doubles as the buffer flush
    /// threshold and as the slice size when a single account's height is
    /// raised across a long chain.
    pub batch_write_size: usize,
    /// Blocks walked between read transaction refreshes
    pub batch_read_size: u64,
    /// Walk length above which a warning is logged
    pub oversized_chain_log_threshold: u64,
}

impl Default for ConfirmationHeightConfig {
    fn default() -> Self {
        Self {
            batch_write_size: 4096,
            batch_read_size: 4096,
            oversized_chain_log_threshold: 20_000,
        }
    }
}
