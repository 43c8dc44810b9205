use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{DateRange, Result};
use crate::modules::ledger::models::{EntryKind, ManualEntry};

/// Read access to manual income and expense entries
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Entries of `kind` dated inside `range` (inclusive)
    async fn find_in_range(&self, kind: EntryKind, range: &DateRange) -> Result<Vec<ManualEntry>>;
}

pub struct MySqlLedgerRepository {
    pool: MySqlPool,
}

impl MySqlLedgerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for MySqlLedgerRepository {
    async fn find_in_range(&self, kind: EntryKind, range: &DateRange) -> Result<Vec<ManualEntry>> {
        // Table name comes from a closed enum, never from input.
        let sql = format!(
            r#"
            SELECT
                id,
                CAST(date AS DATETIME) AS date,
                amount,
                payment_method
            FROM {}
            WHERE date >= ? AND date < ?
            ORDER BY date, id
            "#,
            kind.table()
        );

        let entries = sqlx::query_as::<_, ManualEntry>(&sql)
            .bind(range.lower_bound())
            .bind(range.upper_bound())
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            kind = %kind,
            rows = entries.len(),
            start = %range.start(),
            end = %range.end(),
            "Fetched manual ledger entries"
        );

        Ok(entries)
    }
}
