//! Display formatting for terminal output
//!
//! Tables and detail views for the data models, plus a few shared helpers.

pub mod account;
pub mod budget;
pub mod category;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use budget::{format_budget_list, format_budget_progress};
pub use category::{format_category_details, format_category_list};
pub use transaction::{format_transaction_details, format_transaction_register};
