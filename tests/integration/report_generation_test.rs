//! Report generation through `ReportService` against in-memory repositories.
//!
//! Covers the opening-balance lookup, implicit cash payments, split payments,
//! the preset periods and failure propagation.

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::*;
use posledger::config::ReportConfig;
use posledger::core::{AppError, PaymentMethod};
use posledger::modules::reports::ReportPeriod;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_march_scenario() {
    let service = service_with(march_scenario());

    let report = service
        .generate_financial_report(date(2024, 3, 1), date(2024, 3, 2))
        .await
        .unwrap();

    let income: Vec<_> = report
        .income_rows
        .iter()
        .map(|r| (r.date, r.payment_method.clone(), r.total))
        .collect();
    assert_eq!(
        income,
        vec![
            (date(2024, 3, 1), PaymentMethod::Cash, dec!(100000)),
            (date(2024, 3, 2), PaymentMethod::Cash, dec!(50000)),
        ]
    );

    assert_eq!(report.expense_rows.len(), 1);
    assert_eq!(report.expense_rows[0].date, date(2024, 3, 1));
    assert_eq!(report.expense_rows[0].total, dec!(20000));

    let first = &report.daily[0];
    assert_eq!(first.date, date(2024, 3, 1));
    assert_eq!(first.income_cash, dec!(100000));
    assert_eq!(first.income_qris, Decimal::ZERO);
    assert_eq!(first.total_income, dec!(100000));
    assert_eq!(first.expense_cash, dec!(20000));
    assert_eq!(first.total_expense, dec!(20000));
    assert_eq!(first.net, dec!(80000));

    let second = &report.daily[1];
    assert_eq!(second.date, date(2024, 3, 2));
    assert_eq!(second.income_cash, dec!(50000));
    assert_eq!(second.total_expense, Decimal::ZERO);
    assert_eq!(second.net, dec!(50000));

    assert_eq!(report.starting.cash, dec!(10000));
    assert_eq!(report.summary.order_revenue, dec!(150000));
    assert_eq!(report.summary.manual_incomes, Decimal::ZERO);
    assert_eq!(report.summary.total_incomes, dec!(150000));
    assert_eq!(report.summary.total_expenses, dec!(20000));
    assert_eq!(report.summary.net_income, dec!(130000));
    assert_eq!(report.summary.final_balance, dec!(140000));
}

#[tokio::test]
async fn test_january_opens_with_previous_december() {
    let store = InMemoryStore::new()
        .with_balance(balance(12, 2023, 75_000, 25_000))
        .with_balance(balance(1, 2024, 1, 1));
    let service = service_with(store);

    let report = service
        .generate_financial_report(date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap();

    assert_eq!((report.starting.month, report.starting.year), (12, 2023));
    assert_eq!(report.summary.final_balance, dec!(100000));
    assert_eq!(report.daily.len(), 31);
}

#[tokio::test]
async fn test_missing_starting_balance_opens_at_zero() {
    let store = InMemoryStore::new().with_order(order(1, at(2024, 5, 3, 12), 8_000, &[]));
    let service = service_with(store);

    let report = service
        .generate_financial_report(date(2024, 5, 1), date(2024, 5, 31))
        .await
        .unwrap();

    assert_eq!(report.starting.total(), Decimal::ZERO);
    assert_eq!(report.summary.final_balance, dec!(8000));
}

#[tokio::test]
async fn test_split_payments_and_manual_income() {
    let store = InMemoryStore::new()
        .with_order(order(
            1,
            at(2024, 3, 4, 13),
            50_000,
            &[("cash", 30_000), ("QRIS", 20_000)],
        ))
        .with_income(entry(1, at(2024, 3, 4, 0), 15_000, "qris"))
        .with_expense(entry(1, at(2024, 3, 5, 0), 5_000, "qris"));
    let service = service_with(store);

    let report = service
        .generate_financial_report(date(2024, 3, 4), date(2024, 3, 5))
        .await
        .unwrap();

    assert_eq!(report.income_rows.len(), 2);
    assert_eq!(report.income_rows[0].payment_method, PaymentMethod::Cash);
    assert_eq!(report.income_rows[0].total, dec!(30000));
    assert_eq!(report.income_rows[1].payment_method, PaymentMethod::Qris);
    assert_eq!(report.income_rows[1].total, dec!(35000));

    assert_eq!(report.summary.order_revenue, dec!(50000));
    assert_eq!(report.summary.manual_incomes, dec!(15000));
    assert_eq!(report.summary.total_incomes, dec!(65000));
    assert_eq!(report.summary.income_by_method[&PaymentMethod::Qris], dec!(35000));
    assert_eq!(report.summary.closing_by_method[&PaymentMethod::Qris], dec!(30000));
    assert_eq!(report.daily[1].net, dec!(-5000));
}

#[tokio::test]
async fn test_unknown_method_gets_its_own_bucket() {
    let store = InMemoryStore::new()
        .with_order(order(1, at(2024, 3, 1, 9), 12_000, &[("debit", 12_000)]));
    let service = service_with(store);

    let report = service
        .generate_financial_report(date(2024, 3, 1), date(2024, 3, 1))
        .await
        .unwrap();

    let debit = PaymentMethod::Other("debit".to_string());
    assert_eq!(report.income_rows[0].payment_method, debit);
    assert_eq!(report.daily[0].income_other, dec!(12000));
    assert_eq!(report.daily[0].total_income, dec!(12000));
    assert_eq!(report.summary.income_by_method[&debit], dec!(12000));
}

#[tokio::test]
async fn test_orders_counted_per_day() {
    // The second order on the 4th was given away
    let store = InMemoryStore::new()
        .with_order(order(1, at(2024, 3, 4, 10), 30_000, &[("cash", 30_000)]))
        .with_order(order(2, at(2024, 3, 4, 15), 0, &[]))
        .with_expense(entry(1, at(2024, 3, 5, 0), 5_000, "cash"));
    let service = service_with(store);

    let report = service
        .generate_financial_report(date(2024, 3, 4), date(2024, 3, 5))
        .await
        .unwrap();

    assert_eq!(report.daily[0].orders, 2);
    assert_eq!(report.daily[0].total_income, dec!(30000));
    assert_eq!(report.daily[1].orders, 0);
    assert_eq!(report.summary.order_count, 2);
    assert_eq!(report.summary.order_revenue, dec!(30000));
}

#[tokio::test]
async fn test_store_failure_aborts_report() {
    let result = failing_service()
        .generate_financial_report(date(2024, 3, 1), date(2024, 3, 2))
        .await;

    assert!(matches!(result, Err(AppError::Database(_))));
}

#[tokio::test]
async fn test_reversed_range_is_rejected() {
    let result = service_with(march_scenario())
        .generate_financial_report(date(2024, 3, 2), date(2024, 3, 1))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_range_longer_than_limit_is_rejected() {
    let service = service_with_config(InMemoryStore::new(), ReportConfig { max_range_days: 31 });

    let result = service
        .generate_financial_report(date(2024, 1, 1), date(2024, 2, 1))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_weekly_preset_covers_monday_to_sunday() {
    let service = service_with(march_scenario());

    // 2024-03-01 is a Friday
    let report = service
        .generate_for_period(ReportPeriod::Week(date(2024, 3, 1)))
        .await
        .unwrap();

    assert_eq!(report.start_date, date(2024, 2, 26));
    assert_eq!(report.end_date, date(2024, 3, 3));
    assert_eq!(report.daily.len(), 7);
    // Week starts in February, so January's balance opens it
    assert_eq!((report.starting.month, report.starting.year), (1, 2024));
    assert_eq!(report.summary.total_incomes, dec!(150000));
}

#[tokio::test]
async fn test_monthly_preset() {
    let report = service_with(march_scenario())
        .generate_for_period(ReportPeriod::Month { year: 2024, month: 3 })
        .await
        .unwrap();

    assert_eq!(report.daily.len(), 31);
    assert_eq!(report.summary.final_balance, dec!(140000));
    assert_eq!(report.daily.iter().filter(|d| d.has_activity()).count(), 2);
    assert_eq!(report.day(date(2024, 3, 2)).unwrap().income_cash, dec!(50000));
    assert!(!report.day(date(2024, 3, 31)).unwrap().has_activity());
    assert!(report.day(date(2024, 4, 1)).is_none());
}

#[tokio::test]
async fn test_daily_preset_excludes_other_days() {
    let report = service_with(march_scenario())
        .generate_for_period(ReportPeriod::Day(date(2024, 3, 2)))
        .await
        .unwrap();

    assert_eq!(report.daily.len(), 1);
    assert_eq!(report.summary.total_incomes, dec!(50000));
    assert_eq!(report.summary.total_expenses, Decimal::ZERO);
}
