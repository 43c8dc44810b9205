use std::collections::BTreeMap;
use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::calendar::{parse_date, DATE_FORMAT};
use crate::core::{AppError, Result};
use crate::middleware::query_error_handler;
use crate::modules::reports::models::{
    AggregatedRow, DailyRecap, FinancialReport, MethodTotals, ReportPeriod, ReportSummary,
    RowFilter,
};
use crate::modules::reports::services::ReportService;

/// Query parameters for `GET /reports/financial`
///
/// Dates are taken as strings so a missing or malformed value produces our
/// own validation message.
#[derive(Debug, Deserialize)]
pub struct FinancialReportQuery {
    /// Start of the period (inclusive, YYYY-MM-DD)
    pub start: Option<String>,
    /// End of the period (inclusive, YYYY-MM-DD)
    pub end: Option<String>,
    /// Only list rows for this payment method (`all` for every method)
    pub method: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Query parameters for the daily and weekly presets
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
    pub method: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Query parameters for the monthly preset
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub method: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Rupiah amount rendered as an exact JSON number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(pub Decimal);

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&self.0, serializer)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

/// Response body shared by every report endpoint
#[derive(Debug, Serialize)]
pub struct FinancialReportResponse {
    pub start: String,
    pub end: String,
    pub starting: StartingBalanceResponse,
    pub summary: SummaryResponse,
    pub income_rows: Vec<RowResponse>,
    /// Rows matching the method filter, before paging
    pub income_rows_total: usize,
    pub expense_rows: Vec<RowResponse>,
    pub expense_rows_total: usize,
    pub daily: Vec<DailyRecapResponse>,
}

#[derive(Debug, Serialize)]
pub struct StartingBalanceResponse {
    pub month: u32,
    pub year: i32,
    pub cash: Amount,
    pub qris: Amount,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub order_count: u64,
    pub order_revenue: Amount,
    pub manual_incomes: Amount,
    pub total_incomes: Amount,
    pub total_expenses: Amount,
    pub net_income: Amount,
    pub final_balance: Amount,
    pub income_by_method: BTreeMap<String, Amount>,
    pub expense_by_method: BTreeMap<String, Amount>,
    pub closing_by_method: BTreeMap<String, Amount>,
}

#[derive(Debug, Serialize)]
pub struct RowResponse {
    pub date: String,
    pub payment_method: String,
    pub total: Amount,
}

#[derive(Debug, Serialize)]
pub struct DailyRecapResponse {
    pub date: String,
    pub orders: u64,
    pub income_cash: Amount,
    pub income_qris: Amount,
    pub income_other: Amount,
    pub total_income: Amount,
    pub expense_cash: Amount,
    pub expense_qris: Amount,
    pub expense_other: Amount,
    pub total_expense: Amount,
    pub net: Amount,
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn method_map(totals: MethodTotals) -> BTreeMap<String, Amount> {
    totals
        .into_iter()
        .map(|(method, total)| (method.as_str().to_string(), Amount(total)))
        .collect()
}

impl FinancialReportResponse {
    /// Render a report, applying the method filter and paging to the row lists only
    pub fn from_report(report: FinancialReport, filter: &RowFilter) -> Self {
        let (income_rows, income_rows_total) = filter.apply(&report.income_rows);
        let (expense_rows, expense_rows_total) = filter.apply(&report.expense_rows);

        Self {
            start: format_date(report.start_date),
            end: format_date(report.end_date),
            starting: StartingBalanceResponse {
                month: report.starting.month,
                year: report.starting.year,
                cash: report.starting.cash.into(),
                qris: report.starting.qris.into(),
            },
            summary: SummaryResponse::from(report.summary),
            income_rows: income_rows.into_iter().map(RowResponse::from).collect(),
            income_rows_total,
            expense_rows: expense_rows.into_iter().map(RowResponse::from).collect(),
            expense_rows_total,
            daily: report.daily.into_iter().map(DailyRecapResponse::from).collect(),
        }
    }
}

impl From<ReportSummary> for SummaryResponse {
    fn from(summary: ReportSummary) -> Self {
        Self {
            order_count: summary.order_count,
            order_revenue: summary.order_revenue.into(),
            manual_incomes: summary.manual_incomes.into(),
            total_incomes: summary.total_incomes.into(),
            total_expenses: summary.total_expenses.into(),
            net_income: summary.net_income.into(),
            final_balance: summary.final_balance.into(),
            income_by_method: method_map(summary.income_by_method),
            expense_by_method: method_map(summary.expense_by_method),
            closing_by_method: method_map(summary.closing_by_method),
        }
    }
}

impl From<AggregatedRow> for RowResponse {
    fn from(row: AggregatedRow) -> Self {
        Self {
            date: format_date(row.date),
            payment_method: row.payment_method.as_str().to_string(),
            total: row.total.into(),
        }
    }
}

impl From<DailyRecap> for DailyRecapResponse {
    fn from(day: DailyRecap) -> Self {
        Self {
            date: format_date(day.date),
            orders: day.orders,
            income_cash: day.income_cash.into(),
            income_qris: day.income_qris.into(),
            income_other: day.income_other.into(),
            total_income: day.total_income.into(),
            expense_cash: day.expense_cash.into(),
            expense_qris: day.expense_qris.into(),
            expense_other: day.expense_other.into(),
            total_expense: day.total_expense.into(),
            net: day.net.into(),
        }
    }
}

/// GET /reports/financial?start=YYYY-MM-DD&end=YYYY-MM-DD
pub async fn get_financial_report(
    service: web::Data<Arc<ReportService>>,
    query: web::Query<FinancialReportQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();

    let (Some(start), Some(end)) = (query.start.as_deref(), query.end.as_deref()) else {
        return Err(AppError::validation(
            "start & end query parameters required (YYYY-MM-DD)",
        ));
    };
    let start_date = parse_date("start", start)?;
    let end_date = parse_date("end", end)?;
    let filter = RowFilter::from_query(query.method.as_deref(), query.limit, query.offset)?;

    let report = service
        .generate_financial_report(start_date, end_date)
        .await?;

    Ok(HttpResponse::Ok().json(FinancialReportResponse::from_report(report, &filter)))
}

/// GET /reports/daily?date=YYYY-MM-DD
pub async fn get_daily_report(
    service: web::Data<Arc<ReportService>>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let date = required_date(query.date.as_deref())?;
    let filter = RowFilter::from_query(query.method.as_deref(), query.limit, query.offset)?;

    render_period(&service, ReportPeriod::Day(date), &filter).await
}

/// GET /reports/weekly?date=YYYY-MM-DD (Monday..Sunday week containing the date)
pub async fn get_weekly_report(
    service: web::Data<Arc<ReportService>>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let date = required_date(query.date.as_deref())?;
    let filter = RowFilter::from_query(query.method.as_deref(), query.limit, query.offset)?;

    render_period(&service, ReportPeriod::Week(date), &filter).await
}

/// GET /reports/monthly?year=YYYY&month=M
pub async fn get_monthly_report(
    service: web::Data<Arc<ReportService>>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let (Some(year), Some(month)) = (query.year, query.month) else {
        return Err(AppError::validation("year & month query parameters required"));
    };
    let filter = RowFilter::from_query(query.method.as_deref(), query.limit, query.offset)?;

    render_period(&service, ReportPeriod::Month { year, month }, &filter).await
}

fn required_date(raw: Option<&str>) -> Result<NaiveDate> {
    let raw = raw.ok_or_else(|| AppError::validation("date query parameter required (YYYY-MM-DD)"))?;
    parse_date("date", raw)
}

async fn render_period(
    service: &ReportService,
    period: ReportPeriod,
    filter: &RowFilter,
) -> Result<HttpResponse> {
    let report = service.generate_for_period(period).await?;
    Ok(HttpResponse::Ok().json(FinancialReportResponse::from_report(report, filter)))
}

/// Configure routes for reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .route("/financial", web::get().to(get_financial_report))
            .route("/daily", web::get().to(get_daily_report))
            .route("/weekly", web::get().to(get_weekly_report))
            .route("/monthly", web::get().to(get_monthly_report)),
    );
}
