//! Expense Tracker - personal finance tracking from the terminal
//!
//! Accounts hold balances in a single currency. Income and expense
//! transactions move those balances and are classified by category.
//! Budgets cap spending over a date window, and the analytics reports
//! summarize where the money went.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: the crate-wide error type
//! - `models`: accounts, categories, transactions, budgets and value types
//! - `storage`: in-memory repositories persisted as JSON files
//! - `services`: validation and business rules on top of storage
//! - `audit`: append-only log of every change
//! - `reports`: spending analytics over date ranges
//! - `export`: JSON, YAML and CSV export
//! - `display` and `cli`: terminal formatting and command handlers
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_tracker::config::paths::AppPaths;
//! use expense_tracker::models::{AccountType, Currency, Money};
//! use expense_tracker::services::AccountService;
//! use expense_tracker::storage::Storage;
//!
//! # fn main() -> Result<(), expense_tracker::ExpenseError> {
//! let storage = Storage::new(AppPaths::new()?)?;
//! storage.load_all()?;
//!
//! let account = AccountService::new(&storage).create(
//!     "Checking",
//!     AccountType::Checking,
//!     Currency::Usd,
//!     Money::from_cents(100_00),
//! )?;
//! println!("{} has {}", account.name, account.current_balance);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
