pub mod calendar;
pub mod error;
pub mod money;
pub mod payment_method;

pub use calendar::DateRange;
pub use error::{AppError, Result};
pub use payment_method::PaymentMethod;
