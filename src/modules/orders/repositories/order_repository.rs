use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{DateRange, Result};
use crate::modules::orders::models::{OrderPaymentRow, OrderWithPayments};

/// Read access to completed orders and their payment splits
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Orders whose date falls inside `range` (date-only, inclusive), each with
    /// the payment records that belong to it
    async fn find_in_range(&self, range: &DateRange) -> Result<Vec<OrderWithPayments>>;
}

pub struct MySqlOrderRepository {
    pool: MySqlPool,
}

impl MySqlOrderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn find_in_range(&self, range: &DateRange) -> Result<Vec<OrderWithPayments>> {
        // Payments are scoped through their order, so a split recorded after
        // midnight still lands on the order's day.
        let rows = sqlx::query_as::<_, OrderPaymentRow>(
            r#"
            SELECT
                o.id AS order_id,
                o.date AS order_date,
                o.total AS total,
                p.id AS payment_id,
                p.method AS payment_method,
                p.amount AS payment_amount
            FROM orders o
            LEFT JOIN payment_records p ON p.order_id = o.id
            WHERE o.date >= ? AND o.date < ?
            ORDER BY o.id, p.id
            "#,
        )
        .bind(range.lower_bound())
        .bind(range.upper_bound())
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            rows = rows.len(),
            start = %range.start(),
            end = %range.end(),
            "Fetched order payment rows"
        );

        Ok(OrderWithPayments::from_rows(rows))
    }
}
