//! Budget model
//!
//! A spending cap over an inclusive date window, optionally scoped to a
//! single category. How much has been spent is never stored here; it is
//! computed from live transactions when needed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;

/// A spending budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub name: String,

    /// When set, only this category's expenses count against the limit
    pub category_id: Option<CategoryId>,

    pub amount_limit: Money,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    /// Percentage of the limit at which the budget is flagged (0-100)
    pub notify_at_percent: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        name: impl Into<String>,
        amount_limit: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
        notify_at_percent: i64,
        category_id: Option<CategoryId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            name: name.into(),
            category_id,
            amount_limit,
            start_date,
            end_date,
            notify_at_percent,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `date` falls inside the budget window (both ends inclusive)
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether `spent` has reached the notification threshold
    pub fn threshold_reached(&self, spent: Money) -> bool {
        if self.amount_limit.is_zero() {
            return false;
        }
        spent.percent_of(self.amount_limit) >= self.notify_at_percent as f64
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if !self.amount_limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.amount_limit));
        }

        if self.start_date >= self.end_date {
            return Err(BudgetValidationError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        if !(0..=100).contains(&self.notify_at_percent) {
            return Err(BudgetValidationError::NotifyPercentOutOfRange(
                self.notify_at_percent,
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} to {}, limit {})",
            self.name, self.start_date, self.end_date, self.amount_limit
        )
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NonPositiveLimit(Money),
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    NotifyPercentOutOfRange(i64),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be positive, got {}", limit)
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Budget start {} must be before end {}", start, end)
            }
            Self::NotifyPercentOutOfRange(pct) => {
                write!(f, "Notify percentage must be between 0 and 100, got {}", pct)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
