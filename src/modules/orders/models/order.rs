use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use std::collections::HashMap;

/// One row of `orders LEFT JOIN payment_records`.
///
/// Orders without payment records produce a single row whose payment columns
/// are all NULL.
#[derive(Debug, Clone, FromRow)]
pub struct OrderPaymentRow {
    pub order_id: i64,
    pub order_date: Option<NaiveDateTime>,
    pub total: Option<Decimal>,
    pub payment_id: Option<i64>,
    pub payment_method: Option<String>,
    pub payment_amount: Option<Decimal>,
}

/// One `(method, amount)` split of an order, as stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSplit {
    pub method: Option<String>,
    pub amount: Option<Decimal>,
}

impl PaymentSplit {
    pub fn new(method: impl Into<String>, amount: Decimal) -> Self {
        Self {
            method: Some(method.into()),
            amount: Some(amount),
        }
    }
}

/// Completed sale with its payment splits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderWithPayments {
    pub id: i64,
    pub date: Option<NaiveDateTime>,
    pub total: Option<Decimal>,
    pub payments: Vec<PaymentSplit>,
}

impl OrderWithPayments {
    pub fn new(id: i64, date: NaiveDateTime, total: Decimal, payments: Vec<PaymentSplit>) -> Self {
        Self {
            id,
            date: Some(date),
            total: Some(total),
            payments,
        }
    }

    /// Group joined rows back into orders, keeping first-seen order
    pub fn from_rows(rows: Vec<OrderPaymentRow>) -> Vec<Self> {
        let mut orders: Vec<OrderWithPayments> = Vec::new();
        let mut index: HashMap<i64, usize> = HashMap::new();

        for row in rows {
            let slot = *index.entry(row.order_id).or_insert_with(|| {
                orders.push(OrderWithPayments {
                    id: row.order_id,
                    date: row.order_date,
                    total: row.total,
                    payments: Vec::new(),
                });
                orders.len() - 1
            });

            if row.payment_id.is_some() {
                orders[slot].payments.push(PaymentSplit {
                    method: row.payment_method,
                    amount: row.payment_amount,
                });
            }
        }

        orders
    }

    /// Sum of the recorded splits, NULL amounts counted as zero
    pub fn paid_total(&self) -> Decimal {
        self.payments.iter().filter_map(|p| p.amount).sum()
    }

    /// Whether the splits add up to the order total.
    /// Orders without splits are balanced by definition (paid in cash).
    pub fn is_balanced(&self) -> bool {
        self.payments.is_empty() || Some(self.paid_total()) == self.total
    }
}
