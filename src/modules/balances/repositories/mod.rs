pub mod balance_repository;

pub use balance_repository::{MySqlStartingBalanceRepository, StartingBalanceRepository};
