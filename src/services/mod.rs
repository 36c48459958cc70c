//! Service layer
//!
//! Business logic on top of the storage layer: input validation, balance
//! bookkeeping, cross-entity rules and audit logging. Every service borrows
//! the same `Storage` handle.

pub mod account;
pub mod budget;
pub mod category;
pub mod transaction;

pub use account::AccountService;
pub use budget::{BudgetProgress, BudgetService, BudgetUpdate};
pub use category::{CategoryService, CategoryUpdate};
pub use transaction::{
    CreateTransactionInput, TransactionFilter, TransactionService, TransactionUpdate,
};
