use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::core::money::round_rupiah;

/// Raw `starting_balances` columns; either side may be NULL in old rows
#[derive(Debug, Clone, FromRow)]
pub struct StartingBalanceRow {
    pub cash: Option<Decimal>,
    pub qris: Option<Decimal>,
}

/// Balance carried into a month, per payment method.
///
/// Unlike ledger amounts these may be negative (a month can close in deficit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartingBalance {
    pub month: u32,
    pub year: i32,
    pub cash: Decimal,
    pub qris: Decimal,
}

impl StartingBalance {
    pub fn new(month: u32, year: i32, cash: Decimal, qris: Decimal) -> Self {
        Self {
            month,
            year,
            cash: round_rupiah(cash),
            qris: round_rupiah(qris),
        }
    }

    /// No balance recorded for the month
    pub fn zero(month: u32, year: i32) -> Self {
        Self::new(month, year, Decimal::ZERO, Decimal::ZERO)
    }

    pub fn from_row(month: u32, year: i32, row: StartingBalanceRow) -> Self {
        Self::new(
            month,
            year,
            row.cash.unwrap_or(Decimal::ZERO),
            row.qris.unwrap_or(Decimal::ZERO),
        )
    }

    pub fn total(&self) -> Decimal {
        self.cash + self.qris
    }
}
