//! Custom error types for the expense tracker
//!
//! A single error enum covers every layer. Validation errors are raised by
//! services before anything touches storage; storage and I/O failures are
//! passed through unchanged.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Generic field validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Account input was rejected (empty name, negative balance, inactive)
    #[error("Invalid account: {0}")]
    InvalidAccount(String),

    /// An amount or percentage is out of bounds
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A date range whose start does not precede its end
    #[error("Invalid date range: {start} is not before {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A status change that the lifecycle does not allow
    #[error("{entity_type} cannot move from {from} to {to}")]
    InvalidTransition {
        entity_type: &'static str,
        from: String,
        to: String,
    },

    /// Deleting an entity that is still referenced elsewhere
    #[error("{entity_type} '{identifier}' is still referenced by {references} record(s)")]
    InUse {
        entity_type: &'static str,
        identifier: String,
        references: usize,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ExpenseError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Wrap a rejected status change for the given entity
    pub fn invalid_transition<S: std::fmt::Display>(
        entity_type: &'static str,
        err: crate::models::status::StatusTransitionError<S>,
    ) -> Self {
        Self::InvalidTransition {
            entity_type,
            from: err.from.to_string(),
            to: err.to.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was raised by input validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidAccount(_)
                | Self::InvalidAmount(_)
                | Self::InvalidDateRange { .. }
        )
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
