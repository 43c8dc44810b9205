pub mod models;
pub mod repositories;

pub use models::{EntryKind, ManualEntry};
pub use repositories::{LedgerRepository, MySqlLedgerRepository};
