use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::PaymentMethod;
use crate::modules::balances::StartingBalance;

/// Per-method amounts; `cash` and `qris` are always present
pub type MethodTotals = BTreeMap<PaymentMethod, Decimal>;

/// Empty per-method map with the known methods zero-filled
pub fn zeroed_method_totals() -> MethodTotals {
    let mut totals = MethodTotals::new();
    totals.insert(PaymentMethod::Cash, Decimal::ZERO);
    totals.insert(PaymentMethod::Qris, Decimal::ZERO);
    totals
}

/// Financial report for an inclusive date range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialReport {
    /// Start date of the reporting period (inclusive)
    pub start_date: NaiveDate,
    /// End date of the reporting period (inclusive)
    pub end_date: NaiveDate,
    /// Balance carried over from the month before `start_date`
    pub starting: StartingBalance,
    pub summary: ReportSummary,
    /// Sparse, sorted by (date, method); zero totals omitted
    pub income_rows: Vec<AggregatedRow>,
    /// Sparse, sorted by (date, method); zero totals omitted
    pub expense_rows: Vec<AggregatedRow>,
    /// Dense: one entry per calendar day in the period
    pub daily: Vec<DailyRecap>,
}

/// Period-level totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Orders placed in the period, including ones with a zero total
    pub order_count: u64,
    /// Income from point-of-sale orders
    pub order_revenue: Decimal,
    /// Income from manual entries
    pub manual_incomes: Decimal,
    /// `order_revenue + manual_incomes`
    pub total_incomes: Decimal,
    pub total_expenses: Decimal,
    /// `total_incomes - total_expenses`
    pub net_income: Decimal,
    /// Opening cash + opening QRIS + net income
    pub final_balance: Decimal,
    pub income_by_method: MethodTotals,
    pub expense_by_method: MethodTotals,
    /// Opening balance plus net movement, per method. Sums to `final_balance`.
    pub closing_by_method: MethodTotals,
}

/// Total for one (date, payment method) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedRow {
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub total: Decimal,
}

impl AggregatedRow {
    pub fn new(date: NaiveDate, payment_method: PaymentMethod, total: Decimal) -> Self {
        Self {
            date,
            payment_method,
            total,
        }
    }
}

/// One calendar day of the recap.
///
/// Methods outside cash/QRIS land in the `_other` columns so the day totals
/// still match the sparse rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRecap {
    pub date: NaiveDate,
    /// Orders placed that day, whether or not they brought in money
    pub orders: u64,
    pub income_cash: Decimal,
    pub income_qris: Decimal,
    pub income_other: Decimal,
    pub total_income: Decimal,
    pub expense_cash: Decimal,
    pub expense_qris: Decimal,
    pub expense_other: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
}

impl DailyRecap {
    /// Day with no activity
    pub fn empty(date: NaiveDate) -> Self {
        Self::new(date, MethodSplit::default(), MethodSplit::default())
    }

    pub fn new(date: NaiveDate, income: MethodSplit, expense: MethodSplit) -> Self {
        let total_income = income.total();
        let total_expense = expense.total();

        Self {
            date,
            orders: 0,
            income_cash: income.cash,
            income_qris: income.qris,
            income_other: income.other,
            total_income,
            expense_cash: expense.cash,
            expense_qris: expense.qris,
            expense_other: expense.other,
            total_expense,
            net: total_income - total_expense,
        }
    }

    pub fn with_orders(mut self, orders: u64) -> Self {
        self.orders = orders;
        self
    }

    pub fn has_activity(&self) -> bool {
        self.orders > 0 || !self.total_income.is_zero() || !self.total_expense.is_zero()
    }
}

/// Amounts of one day and direction split into the recap columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethodSplit {
    pub cash: Decimal,
    pub qris: Decimal,
    pub other: Decimal,
}

impl MethodSplit {
    pub fn add(&mut self, method: &PaymentMethod, amount: Decimal) {
        match method.as_str() {
            "cash" => self.cash += amount,
            "qris" => self.qris += amount,
            _ => self.other += amount,
        }
    }

    pub fn total(&self) -> Decimal {
        self.cash + self.qris + self.other
    }
}

impl FinancialReport {
    /// True when nothing was sold, received or spent in the period
    pub fn is_empty(&self) -> bool {
        self.income_rows.is_empty() && self.expense_rows.is_empty()
    }

    /// Number of calendar days covered
    pub fn day_count(&self) -> usize {
        self.daily.len()
    }

    /// Recap entry for one date, if it is inside the period
    pub fn day(&self, date: NaiveDate) -> Option<&DailyRecap> {
        self.daily
            .binary_search_by(|d| d.date.cmp(&date))
            .ok()
            .map(|i| &self.daily[i])
    }
}
