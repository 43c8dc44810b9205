use crate::core::{AppError, PaymentMethod, Result};
use crate::modules::reports::models::AggregatedRow;

/// Largest page of income/expense rows a single request may ask for
pub const MAX_ROW_LIMIT: usize = 500;

/// Method filter and paging applied to the sparse income/expense rows.
/// The summary and daily recap are never filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    pub method: Option<PaymentMethod>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl RowFilter {
    /// Build from raw query values; `method=all` (or empty) disables the filter
    pub fn from_query(method: Option<&str>, limit: Option<usize>, offset: Option<usize>) -> Result<Self> {
        let method = match method.map(str::trim) {
            None | Some("") => None,
            Some(m) if m.eq_ignore_ascii_case("all") => None,
            Some(m) => Some(PaymentMethod::from_raw(Some(m))),
        };

        if let Some(limit) = limit {
            if limit == 0 || limit > MAX_ROW_LIMIT {
                return Err(AppError::validation(format!(
                    "limit must be between 1 and {}",
                    MAX_ROW_LIMIT
                )));
            }
        }

        Ok(Self {
            method,
            limit,
            offset: offset.unwrap_or(0),
        })
    }

    /// Filtered page plus the filtered row count before paging
    pub fn apply(&self, rows: &[AggregatedRow]) -> (Vec<AggregatedRow>, usize) {
        let matching: Vec<&AggregatedRow> = rows
            .iter()
            .filter(|row| {
                self.method
                    .as_ref()
                    .map_or(true, |method| &row.payment_method == method)
            })
            .collect();

        let total = matching.len();
        let page = matching
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        (page, total)
    }
}
