use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::PaymentMethod;
use crate::modules::ledger::EntryKind;

/// Where a normalized record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    /// Payment split of a point-of-sale order (or the implicit cash payment)
    Order,
    /// Manual income or expense entry
    Manual,
}

/// Strict internal shape every store row is normalized into before aggregation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRecord {
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub amount: Decimal,
    pub kind: EntryKind,
    pub source: RecordSource,
}

impl LedgerRecord {
    pub fn income(date: NaiveDate, payment_method: PaymentMethod, amount: Decimal, source: RecordSource) -> Self {
        Self {
            date,
            payment_method,
            amount,
            kind: EntryKind::Income,
            source,
        }
    }

    pub fn expense(date: NaiveDate, payment_method: PaymentMethod, amount: Decimal) -> Self {
        Self {
            date,
            payment_method,
            amount,
            kind: EntryKind::Expense,
            source: RecordSource::Manual,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }
}
