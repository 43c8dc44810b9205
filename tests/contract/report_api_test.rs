//! Contract tests for the report endpoints
//!
//! Validates status codes, the JSON shape of reports and errors, and the
//! row filter/paging query parameters of `GET /reports/*`.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use actix_web::{test, web, App};
use serde_json::Value;

use helpers::*;
use posledger::middleware::{ErrorHandler, RequestId};
use posledger::modules::reports::{self, ReportService};

async fn get(service: Arc<ReportService>, uri: &str) -> (u16, Value) {
    let app = test::init_service(
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .app_data(web::Data::new(service))
            .configure(reports::configure),
    )
    .await;

    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

fn amount(value: &Value) -> i64 {
    value
        .as_i64()
        .unwrap_or_else(|| panic!("expected an integer JSON number, got {}", value))
}

fn assert_error(body: &Value, code: u16, fragment: &str) {
    assert_eq!(body["error"]["code"].as_u64(), Some(u64::from(code)));
    let message = body["error"]["message"].as_str().unwrap();
    assert!(
        message.contains(fragment),
        "error message {:?} should mention {:?}",
        message,
        fragment
    );
}

#[actix_web::test]
async fn test_financial_report_response_structure() {
    let (status, body) = get(
        service_with(march_scenario()),
        "/reports/financial?start=2024-03-01&end=2024-03-02",
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["start"], "2024-03-01");
    assert_eq!(body["end"], "2024-03-02");

    assert_eq!(amount(&body["starting"]["cash"]), 10_000);
    assert_eq!(amount(&body["starting"]["qris"]), 0);

    let summary = &body["summary"];
    assert_eq!(summary["order_count"], 2);
    assert_eq!(amount(&summary["order_revenue"]), 150_000);
    assert_eq!(amount(&summary["manual_incomes"]), 0);
    assert_eq!(amount(&summary["total_incomes"]), 150_000);
    assert_eq!(amount(&summary["total_expenses"]), 20_000);
    assert_eq!(amount(&summary["net_income"]), 130_000);
    assert_eq!(amount(&summary["final_balance"]), 140_000);
    assert_eq!(amount(&summary["income_by_method"]["cash"]), 150_000);
    assert_eq!(amount(&summary["income_by_method"]["qris"]), 0);
    assert_eq!(amount(&summary["closing_by_method"]["cash"]), 140_000);

    let income = body["income_rows"].as_array().unwrap();
    assert_eq!(income.len(), 2);
    assert_eq!(income[0]["date"], "2024-03-01");
    assert_eq!(income[0]["payment_method"], "cash");
    assert_eq!(amount(&income[0]["total"]), 100_000);
    assert_eq!(income[1]["date"], "2024-03-02");
    assert_eq!(amount(&income[1]["total"]), 50_000);
    assert_eq!(body["income_rows_total"], 2);

    let expenses = body["expense_rows"].as_array().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(amount(&expenses[0]["total"]), 20_000);
    assert_eq!(body["expense_rows_total"], 1);

    let daily = body["daily"].as_array().unwrap();
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0]["date"], "2024-03-01");
    assert_eq!(daily[0]["orders"], 1);
    assert_eq!(amount(&daily[0]["income_cash"]), 100_000);
    assert_eq!(amount(&daily[0]["income_qris"]), 0);
    assert_eq!(amount(&daily[0]["income_other"]), 0);
    assert_eq!(amount(&daily[0]["total_income"]), 100_000);
    assert_eq!(amount(&daily[0]["expense_cash"]), 20_000);
    assert_eq!(amount(&daily[0]["total_expense"]), 20_000);
    assert_eq!(amount(&daily[0]["net"]), 80_000);
    assert_eq!(amount(&daily[1]["net"]), 50_000);
    assert_eq!(daily[1]["orders"], 1);
}

#[actix_web::test]
async fn test_missing_parameters_rejected() {
    let service = service_with(march_scenario());

    let (status, body) = get(service.clone(), "/reports/financial?start=2024-03-01").await;
    assert_eq!(status, 400);
    assert_error(&body, 400, "start & end query parameters required");

    let (status, _) = get(service, "/reports/financial").await;
    assert_eq!(status, 400);
}

#[actix_web::test]
async fn test_malformed_date_rejected() {
    let (status, body) = get(
        service_with(march_scenario()),
        "/reports/financial?start=2024-13-01&end=2024-03-02",
    )
    .await;

    assert_eq!(status, 400);
    assert_error(&body, 400, "Invalid start format");
}

#[actix_web::test]
async fn test_reversed_range_rejected() {
    let (status, body) = get(
        service_with(march_scenario()),
        "/reports/financial?start=2024-03-02&end=2024-03-01",
    )
    .await;

    assert_eq!(status, 400);
    assert_error(&body, 400, "must be before or equal to");
}

#[actix_web::test]
async fn test_non_numeric_limit_rejected_as_json() {
    let (status, body) = get(
        service_with(march_scenario()),
        "/reports/financial?start=2024-03-01&end=2024-03-02&limit=abc",
    )
    .await;

    assert_eq!(status, 400);
    assert_error(&body, 400, "Invalid query parameters");
}

#[actix_web::test]
async fn test_limit_out_of_bounds_rejected() {
    let (status, body) = get(
        service_with(march_scenario()),
        "/reports/financial?start=2024-03-01&end=2024-03-02&limit=501",
    )
    .await;

    assert_eq!(status, 400);
    assert_error(&body, 400, "limit must be between 1 and 500");
}

#[actix_web::test]
async fn test_store_failure_returns_500() {
    let (status, body) = get(
        failing_service(),
        "/reports/financial?start=2024-03-01&end=2024-03-02",
    )
    .await;

    assert_eq!(status, 500);
    assert_error(&body, 500, "Database error");
}

#[actix_web::test]
async fn test_row_paging_keeps_totals() {
    let (status, body) = get(
        service_with(march_scenario()),
        "/reports/financial?start=2024-03-01&end=2024-03-02&limit=1&offset=1",
    )
    .await;

    assert_eq!(status, 200);
    let income = body["income_rows"].as_array().unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0]["date"], "2024-03-02");
    assert_eq!(body["income_rows_total"], 2);
    assert_eq!(body["daily"].as_array().unwrap().len(), 2);
    assert_eq!(amount(&body["summary"]["final_balance"]), 140_000);
}

#[actix_web::test]
async fn test_method_filter_applies_to_rows_only() {
    let (status, body) = get(
        service_with(march_scenario()),
        "/reports/financial?start=2024-03-01&end=2024-03-02&method=qris",
    )
    .await;

    assert_eq!(status, 200);
    assert!(body["income_rows"].as_array().unwrap().is_empty());
    assert_eq!(body["income_rows_total"], 0);
    assert_eq!(body["expense_rows_total"], 0);
    assert_eq!(amount(&body["summary"]["total_incomes"]), 150_000);
    assert_eq!(amount(&body["daily"][0]["total_income"]), 100_000);
}

#[actix_web::test]
async fn test_daily_preset() {
    let (status, body) = get(service_with(march_scenario()), "/reports/daily?date=2024-03-01").await;

    assert_eq!(status, 200);
    assert_eq!(body["start"], "2024-03-01");
    assert_eq!(body["end"], "2024-03-01");
    assert_eq!(amount(&body["summary"]["net_income"]), 80_000);
}

#[actix_web::test]
async fn test_weekly_preset() {
    let (status, body) = get(service_with(march_scenario()), "/reports/weekly?date=2024-03-01").await;

    assert_eq!(status, 200);
    assert_eq!(body["start"], "2024-02-26");
    assert_eq!(body["end"], "2024-03-03");
    assert_eq!(body["daily"].as_array().unwrap().len(), 7);
}

#[actix_web::test]
async fn test_weekly_preset_past_last_calendar_week_rejected() {
    // `%2B` keeps the year sign, a bare `+` decodes to a space
    let (status, body) = get(
        service_with(march_scenario()),
        "/reports/weekly?date=%2B262142-12-31",
    )
    .await;

    assert_eq!(status, 400);
    assert_error(&body, 400, "out of range");
}

#[actix_web::test]
async fn test_monthly_preset() {
    let service = service_with(march_scenario());

    let (status, body) = get(service.clone(), "/reports/monthly?year=2024&month=3").await;
    assert_eq!(status, 200);
    assert_eq!(body["daily"].as_array().unwrap().len(), 31);
    assert_eq!(amount(&body["summary"]["final_balance"]), 140_000);

    let (status, body) = get(service.clone(), "/reports/monthly?year=2024&month=13").await;
    assert_eq!(status, 400);
    assert_error(&body, 400, "Invalid month");

    let (status, _) = get(service, "/reports/monthly?year=2024").await;
    assert_eq!(status, 400);
}

#[actix_web::test]
async fn test_preset_requires_date() {
    let (status, body) = get(service_with(march_scenario()), "/reports/weekly").await;

    assert_eq!(status, 400);
    assert_error(&body, 400, "date query parameter required");
}
