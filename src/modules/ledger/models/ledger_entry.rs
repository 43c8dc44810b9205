use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Table holding manual entries of this kind
    pub fn table(&self) -> &'static str {
        match self {
            EntryKind::Income => "incomes",
            EntryKind::Expense => "expenses",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Income => write!(f, "income"),
            EntryKind::Expense => write!(f, "expense"),
        }
    }
}

/// Manually entered income or expense, not tied to any order
/// (cash injection, rent, supplies...)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ManualEntry {
    pub id: i64,
    pub date: Option<NaiveDateTime>,
    pub amount: Option<Decimal>,
    pub payment_method: Option<String>,
}

impl ManualEntry {
    pub fn new(id: i64, date: NaiveDateTime, amount: Decimal, payment_method: &str) -> Self {
        Self {
            id,
            date: Some(date),
            amount: Some(amount),
            payment_method: Some(payment_method.to_string()),
        }
    }
}
