use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::balances::models::{StartingBalance, StartingBalanceRow};

/// Read access to the monthly opening balances
#[async_trait]
pub trait StartingBalanceRepository: Send + Sync {
    /// Balance recorded for `(month, year)`; `None` when the month has no row
    async fn find_for_month(&self, month: u32, year: i32) -> Result<Option<StartingBalance>>;
}

pub struct MySqlStartingBalanceRepository {
    pool: MySqlPool,
}

impl MySqlStartingBalanceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StartingBalanceRepository for MySqlStartingBalanceRepository {
    async fn find_for_month(&self, month: u32, year: i32) -> Result<Option<StartingBalance>> {
        let row = sqlx::query_as::<_, StartingBalanceRow>(
            r#"
            SELECT cash, qris
            FROM starting_balances
            WHERE month = ? AND year = ?
            LIMIT 1
            "#,
        )
        .bind(month)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| StartingBalance::from_row(month, year, row)))
    }
}
