pub mod financial_report;
pub mod ledger_record;
pub mod report_period;
pub mod row_filter;

pub use financial_report::{
    zeroed_method_totals, AggregatedRow, DailyRecap, FinancialReport, MethodSplit, MethodTotals,
    ReportSummary,
};
pub use ledger_record::{LedgerRecord, RecordSource};
pub use report_period::ReportPeriod;
pub use row_filter::RowFilter;
