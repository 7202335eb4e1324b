pub mod errors;
pub mod ledger;
pub mod store;

pub use errors::Result;
pub use errors::StoreError;
pub use ledger::PersistOutcome;
pub use ledger::TradeLedger;
