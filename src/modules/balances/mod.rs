pub mod models;
pub mod repositories;

pub use models::StartingBalance;
pub use repositories::{MySqlStartingBalanceRepository, StartingBalanceRepository};
