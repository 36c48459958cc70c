//! Spending analytics
//!
//! Pure aggregation functions over transaction slices, plus report types
//! that pull their input from storage and format it for the terminal.
//! Cancelled transactions never count toward any figure.

use std::collections::HashMap;

use crate::error::ExpenseResult;
use crate::models::CategoryId;
use crate::storage::Storage;

pub mod breakdown;
pub mod range;
pub mod summary;
pub mod trend;

pub use breakdown::{category_breakdown, BreakdownRow, CategoryBreakdownReport, CategoryTotal};
pub use range::{DateRange, MonthKey, Period};
pub use summary::{monthly_change, percent_change, summarize, MonthlyChange, Summary, SummaryReport};
pub use trend::{monthly_trend, MonthlyTrendReport, TrendPoint};

/// Category names keyed by ID, inactive categories included
pub(crate) fn category_names(storage: &Storage) -> ExpenseResult<HashMap<CategoryId, String>> {
    Ok(storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}
