pub mod order;

pub use order::{OrderPaymentRow, OrderWithPayments, PaymentSplit};
