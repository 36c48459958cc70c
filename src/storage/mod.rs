//! Storage layer
//!
//! JSON file storage with atomic writes. Each entity type has its own
//! repository holding an in-memory map that is loaded once and written back
//! on save. `Storage` owns the repositories and the audit logger and is
//! passed by reference into every service.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod file_io;
pub mod init;
pub mod transactions;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

pub use accounts::AccountRepository;
pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{default_categories, initialize_storage};
pub use transactions::TransactionRepository;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::AppPaths;
use crate::error::{ExpenseError, ExpenseResult};

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> ExpenseResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> ExpenseResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: AppPaths,
    pub accounts: AccountRepository,
    pub categories: CategoryRepository,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage handle rooted at `paths`, creating directories as needed
    pub fn new(paths: AppPaths) -> ExpenseResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> ExpenseResult<()> {
        self.accounts.load()?;
        self.categories.load()?;
        self.transactions.load()?;
        self.budgets.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> ExpenseResult<()> {
        self.accounts.save()?;
        self.categories.save()?;
        self.transactions.save()?;
        self.budgets.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl ToString,
        entity_name: Option<String>,
        entity: &T,
    ) -> ExpenseResult<()> {
        self.audit.log(&AuditEntry::create(
            entity_type,
            entity_id.to_string(),
            entity_name,
            entity,
        ))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl ToString,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> ExpenseResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id.to_string(),
            entity_name,
            before,
            after,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl ToString,
        entity_name: Option<String>,
        entity: &T,
    ) -> ExpenseResult<()> {
        self.audit.log(&AuditEntry::delete(
            entity_type,
            entity_id.to_string(),
            entity_name,
            entity,
        ))
    }

    /// Append several prepared entries in one write
    pub fn log_batch(&self, entries: &[AuditEntry]) -> ExpenseResult<()> {
        self.audit.log_batch(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Account, AccountType, Currency};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_all_and_load_all() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();

        let account = Account::new("Checking", AccountType::Checking, Currency::Usd);
        let id = account.id;
        storage.accounts.upsert(account).unwrap();
        storage.save_all().unwrap();

        assert!(paths.accounts_file().exists());
        assert!(paths.budgets_file().exists());

        let reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert!(reopened.accounts.get(id).unwrap().is_some());
    }

    #[test]
    fn test_log_helpers_write_audit_entries() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let before = Account::new("Cash", AccountType::Cash, Currency::Usd);
        let mut after = before.clone();
        after.name = "Wallet".into();

        storage
            .log_create(EntityType::Account, before.id, Some(before.name.clone()), &before)
            .unwrap();
        storage
            .log_update(EntityType::Account, after.id, Some(after.name.clone()), &before, &after)
            .unwrap();
        storage
            .log_delete(EntityType::Account, after.id, None, &after)
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        let ops: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(ops, vec![Operation::Create, Operation::Update, Operation::Delete]);
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("name: \"Cash\" -> \"Wallet\"")
        );
    }
}
