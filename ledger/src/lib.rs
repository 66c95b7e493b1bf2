mod ledger;
pub use ledger::Ledger;

mod ledger_builder;
pub use ledger_builder::LedgerBuilder;

mod ledger_cache;
pub use ledger_cache::LedgerCache;

mod ledger_constants;
pub use ledger_constants::LedgerConstants;
