pub mod starting_balance;

pub use starting_balance::{StartingBalance, StartingBalanceRow};
