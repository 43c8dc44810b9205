//! POS Ledger financial reporting library
//!
//! Builds period financial reports for a point-of-sale back office: order
//! payments, manual incomes and expenses, and the opening balance carried in
//! from the previous month, aggregated per payment method and per day.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::balances;
pub use modules::ledger;
pub use modules::orders;
pub use modules::reports;
