use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::warn;

use crate::core::money::coerce_amount;
use crate::core::PaymentMethod;
use crate::modules::ledger::{EntryKind, ManualEntry};
use crate::modules::orders::OrderWithPayments;
use crate::modules::reports::models::{LedgerRecord, RecordSource};

/// Output of one normalization pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub records: Vec<LedgerRecord>,
    /// Date of every dated order, one entry per order even when it earned nothing
    pub order_dates: Vec<NaiveDate>,
    /// Rows that were dropped or had their amount coerced
    pub anomalies: usize,
}

impl NormalizedBatch {
    fn push(&mut self, record: LedgerRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, other: NormalizedBatch) {
        self.records.extend(other.records);
        self.order_dates.extend(other.order_dates);
        self.anomalies += other.anomalies;
    }
}

/// Turns loosely-typed store rows into strict [`LedgerRecord`]s.
///
/// Dateless rows are dropped, NULL/negative amounts count as zero,
/// fractional amounts are rounded to whole rupiah and zero amounts are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Income records from orders, one per payment split.
    ///
    /// An order with no splits and a positive total was paid in cash.
    pub fn normalize_orders(&self, orders: &[OrderWithPayments]) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();

        for order in orders {
            let Some(timestamp) = order.date else {
                warn!(order_id = order.id, "Dropping order without a date");
                batch.anomalies += 1;
                continue;
            };
            let date = timestamp.date();
            batch.order_dates.push(date);

            if order.payments.is_empty() {
                let (total, anomaly) = coerce_amount(order.total);
                if let Some(anomaly) = anomaly {
                    warn!(order_id = order.id, %anomaly, "Coerced order total");
                    batch.anomalies += 1;
                }
                if total > Decimal::ZERO {
                    batch.push(LedgerRecord::income(
                        date,
                        PaymentMethod::Cash,
                        total,
                        RecordSource::Order,
                    ));
                }
                continue;
            }

            if !order.is_balanced() {
                warn!(
                    order_id = order.id,
                    total = ?order.total,
                    paid = %order.paid_total(),
                    "Payment splits do not add up to the order total"
                );
            }

            for split in &order.payments {
                let (amount, anomaly) = coerce_amount(split.amount);
                if let Some(anomaly) = anomaly {
                    warn!(order_id = order.id, %anomaly, "Coerced payment amount");
                    batch.anomalies += 1;
                }
                if amount.is_zero() {
                    continue;
                }

                let method = resolve_method(split.method.as_deref(), "order", order.id);
                batch.push(LedgerRecord::income(date, method, amount, RecordSource::Order));
            }
        }

        batch
    }

    /// Records from manual income or expense entries
    pub fn normalize_entries(&self, kind: EntryKind, entries: &[ManualEntry]) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();

        for entry in entries {
            let Some(date) = entry.date.as_ref().map(NaiveDateTime::date) else {
                warn!(table = kind.table(), id = entry.id, "Dropping entry without a date");
                batch.anomalies += 1;
                continue;
            };

            let (amount, anomaly) = coerce_amount(entry.amount);
            if let Some(anomaly) = anomaly {
                warn!(table = kind.table(), id = entry.id, %anomaly, "Coerced entry amount");
                batch.anomalies += 1;
            }
            if amount.is_zero() {
                continue;
            }

            let method = resolve_method(entry.payment_method.as_deref(), kind.table(), entry.id);
            let record = match kind {
                EntryKind::Income => {
                    LedgerRecord::income(date, method, amount, RecordSource::Manual)
                }
                EntryKind::Expense => LedgerRecord::expense(date, method, amount),
            };
            batch.push(record);
        }

        batch
    }
}

fn resolve_method(raw: Option<&str>, source: &str, id: i64) -> PaymentMethod {
    let method = PaymentMethod::from_raw(raw);
    if !method.is_known() {
        warn!(source, id, method = %method, "Unknown payment method, bucketing separately");
    }
    method
}
