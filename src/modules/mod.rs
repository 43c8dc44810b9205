pub mod balances;
pub mod health;
pub mod ledger;
pub mod orders;
pub mod reports;
