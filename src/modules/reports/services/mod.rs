pub mod aggregator;
pub mod normalizer;
pub mod report_service;

pub use aggregator::FinancialAggregator;
pub use normalizer::{NormalizedBatch, Normalizer};
pub use report_service::ReportService;
