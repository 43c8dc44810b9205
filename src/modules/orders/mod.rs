pub mod models;
pub mod repositories;

pub use models::{OrderWithPayments, PaymentSplit};
pub use repositories::{MySqlOrderRepository, OrderRepository};
