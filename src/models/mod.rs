//! Core data models for the expense tracker
//!
//! Accounts, categories, transactions and budgets, plus the value types
//! they are built from.

pub mod account;
pub mod budget;
pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod status;
pub mod transaction;

pub use account::{Account, AccountType};
pub use budget::Budget;
pub use category::{Category, CategoryKind};
pub use currency::Currency;
pub use ids::{AccountId, BudgetId, CategoryId, TransactionId};
pub use money::Money;
pub use status::{ActivityStatus, TransactionStatus};
pub use transaction::Transaction;
