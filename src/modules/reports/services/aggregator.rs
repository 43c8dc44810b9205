use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::core::{DateRange, PaymentMethod};
use crate::modules::balances::StartingBalance;
use crate::modules::reports::models::{
    zeroed_method_totals, AggregatedRow, DailyRecap, FinancialReport, LedgerRecord, MethodSplit,
    MethodTotals, RecordSource, ReportSummary,
};

type RowTotals = BTreeMap<(NaiveDate, PaymentMethod), Decimal>;

/// Pure computation from normalized records to a [`FinancialReport`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FinancialAggregator;

impl FinancialAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate one period.
    ///
    /// Records and order dates outside `range` are ignored. The daily recap
    /// always has one entry per day of the range; the row lists only carry
    /// positive totals. `order_dates` holds one date per order placed.
    pub fn aggregate(
        &self,
        range: DateRange,
        starting: StartingBalance,
        records: &[LedgerRecord],
        order_dates: &[NaiveDate],
    ) -> FinancialReport {
        let mut order_revenue = Decimal::ZERO;
        let mut manual_incomes = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;

        let mut income_by_method = zeroed_method_totals();
        let mut expense_by_method = zeroed_method_totals();

        let mut income_rows = RowTotals::new();
        let mut expense_rows = RowTotals::new();

        let mut days: HashMap<NaiveDate, (MethodSplit, MethodSplit)> = HashMap::new();

        for record in records {
            if !range.contains(record.date) {
                warn!(date = %record.date, "Ignoring record outside the report period");
                continue;
            }

            let key = (record.date, record.payment_method.clone());
            let day = days.entry(record.date).or_default();

            if record.is_income() {
                match record.source {
                    RecordSource::Order => order_revenue += record.amount,
                    RecordSource::Manual => manual_incomes += record.amount,
                }
                *income_by_method
                    .entry(record.payment_method.clone())
                    .or_insert(Decimal::ZERO) += record.amount;
                *income_rows.entry(key).or_insert(Decimal::ZERO) += record.amount;
                day.0.add(&record.payment_method, record.amount);
            } else {
                total_expenses += record.amount;
                *expense_by_method
                    .entry(record.payment_method.clone())
                    .or_insert(Decimal::ZERO) += record.amount;
                *expense_rows.entry(key).or_insert(Decimal::ZERO) += record.amount;
                day.1.add(&record.payment_method, record.amount);
            }
        }

        let mut orders_per_day: HashMap<NaiveDate, u64> = HashMap::new();
        let mut order_count = 0;
        for date in order_dates.iter().filter(|d| range.contains(**d)) {
            *orders_per_day.entry(*date).or_default() += 1;
            order_count += 1;
        }

        let daily = range
            .days()
            .map(|date| {
                let recap = match days.get(&date) {
                    Some((income, expense)) => DailyRecap::new(date, *income, *expense),
                    None => DailyRecap::empty(date),
                };
                recap.with_orders(orders_per_day.get(&date).copied().unwrap_or(0))
            })
            .collect();

        let total_incomes = order_revenue + manual_incomes;
        let net_income = total_incomes - total_expenses;
        let closing_by_method = closing_balances(&starting, &income_by_method, &expense_by_method);

        FinancialReport {
            start_date: range.start(),
            end_date: range.end(),
            starting,
            summary: ReportSummary {
                order_count,
                order_revenue,
                manual_incomes,
                total_incomes,
                total_expenses,
                net_income,
                final_balance: starting.total() + net_income,
                income_by_method,
                expense_by_method,
                closing_by_method,
            },
            income_rows: into_rows(income_rows),
            expense_rows: into_rows(expense_rows),
            daily,
        }
    }
}

// BTreeMap iteration already yields (date, method) order.
fn into_rows(totals: RowTotals) -> Vec<AggregatedRow> {
    totals
        .into_iter()
        .filter(|(_, total)| *total > Decimal::ZERO)
        .map(|((date, method), total)| AggregatedRow::new(date, method, total))
        .collect()
}

fn closing_balances(
    starting: &StartingBalance,
    income: &MethodTotals,
    expense: &MethodTotals,
) -> MethodTotals {
    let mut closing = zeroed_method_totals();
    closing.insert(PaymentMethod::Cash, starting.cash);
    closing.insert(PaymentMethod::Qris, starting.qris);

    for (method, amount) in income {
        *closing.entry(method.clone()).or_insert(Decimal::ZERO) += *amount;
    }
    for (method, amount) in expense {
        *closing.entry(method.clone()).or_insert(Decimal::ZERO) -= *amount;
    }

    closing
}
