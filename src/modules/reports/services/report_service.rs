use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::ReportConfig;
use crate::core::calendar::previous_month;
use crate::core::money::format_rupiah;
use crate::core::{AppError, DateRange, Result};
use crate::modules::balances::{StartingBalance, StartingBalanceRepository};
use crate::modules::ledger::{EntryKind, LedgerRepository};
use crate::modules::orders::OrderRepository;
use crate::modules::reports::models::{FinancialReport, ReportPeriod};
use crate::modules::reports::services::{FinancialAggregator, Normalizer};

/// Service for generating POS financial reports
pub struct ReportService {
    order_repo: Arc<dyn OrderRepository>,
    ledger_repo: Arc<dyn LedgerRepository>,
    balance_repo: Arc<dyn StartingBalanceRepository>,
    config: ReportConfig,
    normalizer: Normalizer,
    aggregator: FinancialAggregator,
}

impl ReportService {
    pub fn new(
        order_repo: Arc<dyn OrderRepository>,
        ledger_repo: Arc<dyn LedgerRepository>,
        balance_repo: Arc<dyn StartingBalanceRepository>,
        config: ReportConfig,
    ) -> Self {
        Self {
            order_repo,
            ledger_repo,
            balance_repo,
            config,
            normalizer: Normalizer::new(),
            aggregator: FinancialAggregator::new(),
        }
    }

    /// Validate that a date range is reasonable
    ///
    /// `start_date` must not be after `end_date`, and the range may not be
    /// longer than the configured maximum number of days.
    pub fn validate_date_range(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<DateRange> {
        let range = DateRange::new(start_date, end_date)?;
        self.check_length(&range)?;
        Ok(range)
    }

    fn check_length(&self, range: &DateRange) -> Result<()> {
        let max = i64::from(self.config.max_range_days);
        if range.day_count() > max {
            return Err(AppError::validation(format!(
                "Date range too large: {} days (maximum {} days)",
                range.day_count(),
                max
            )));
        }
        Ok(())
    }

    /// Generate the financial report for an inclusive date range
    ///
    /// The opening balance is the one recorded for the month before
    /// `start_date`'s month; a month without a row opens at zero.
    ///
    /// # Errors
    /// Validation error for a reversed or oversized range, database error if
    /// any of the fetches fails. No partial report is produced.
    pub async fn generate_financial_report(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<FinancialReport> {
        let range = self.validate_date_range(start_date, end_date)?;
        self.generate(range).await
    }

    /// Generate the report for a preset period (day, week, month)
    pub async fn generate_for_period(&self, period: ReportPeriod) -> Result<FinancialReport> {
        let range = period.resolve()?;
        self.check_length(&range)?;
        self.generate(range).await
    }

    async fn generate(&self, range: DateRange) -> Result<FinancialReport> {
        info!(start = %range.start(), end = %range.end(), "Generating financial report");

        let (opening_month, opening_year) = previous_month(range.start());

        let (orders, incomes, expenses, starting) = tokio::try_join!(
            self.order_repo.find_in_range(&range),
            self.ledger_repo.find_in_range(EntryKind::Income, &range),
            self.ledger_repo.find_in_range(EntryKind::Expense, &range),
            self.balance_repo.find_for_month(opening_month, opening_year),
        )?;

        let starting = starting.unwrap_or_else(|| {
            debug!(
                month = opening_month,
                year = opening_year,
                "No starting balance recorded, opening at zero"
            );
            StartingBalance::zero(opening_month, opening_year)
        });

        let mut batch = self.normalizer.normalize_orders(&orders);
        batch.extend(self.normalizer.normalize_entries(EntryKind::Income, &incomes));
        batch.extend(self.normalizer.normalize_entries(EntryKind::Expense, &expenses));

        if batch.anomalies > 0 {
            warn!(
                anomalies = batch.anomalies,
                "Some store rows were dropped or coerced while building the report"
            );
        }

        let report = self
            .aggregator
            .aggregate(range, starting, &batch.records, &batch.order_dates);

        if report.is_empty() {
            warn!(
                "Empty financial report generated for period {} to {}",
                range.start(),
                range.end()
            );
        } else {
            info!(
                orders = orders.len(),
                incomes = incomes.len(),
                expenses = expenses.len(),
                "Financial report generated: income {}, expenses {}, final balance {}",
                format_rupiah(report.summary.total_incomes),
                format_rupiah(report.summary.total_expenses),
                format_rupiah(report.summary.final_balance)
            );
        }

        Ok(report)
    }
}
