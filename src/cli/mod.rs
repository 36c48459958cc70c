//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers resolve
//! names to IDs, call a service and print the result; errors are returned
//! to `main`.

use chrono::{Local, NaiveDate};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Account, Category, Currency, Money};
use crate::services::{AccountService, CategoryService};

pub mod account;
pub mod audit;
pub mod budget;
pub mod category;
pub mod export;
pub mod report;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use audit::{handle_audit_command, AuditArgs};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportArgs};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

pub(crate) fn parse_money(s: &str) -> ExpenseResult<Money> {
    Money::parse(s).map_err(|e| {
        ExpenseError::InvalidAmount(format!(
            "'{}': {}. Use a format like '12.50' or '12'",
            s, e
        ))
    })
}

/// Parse `YYYY-MM-DD`; `None` means today
pub(crate) fn parse_date(s: Option<&str>) -> ExpenseResult<NaiveDate> {
    match s {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            ExpenseError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", s))
        }),
        None => Ok(Local::now().date_naive()),
    }
}

pub(crate) fn parse_currency(s: &str) -> ExpenseResult<Currency> {
    s.parse().map_err(ExpenseError::Validation)
}

pub(crate) fn resolve_account(
    service: &AccountService,
    identifier: &str,
) -> ExpenseResult<Account> {
    service
        .find(identifier)?
        .ok_or_else(|| ExpenseError::account_not_found(identifier))
}

pub(crate) fn resolve_category(
    service: &CategoryService,
    identifier: &str,
) -> ExpenseResult<Category> {
    service
        .find(identifier)?
        .ok_or_else(|| ExpenseError::category_not_found(identifier))
}
