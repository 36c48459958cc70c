//! Account repository for JSON storage
//!
//! Manages loading and saving accounts to accounts.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseResult;
use crate::models::{Account, AccountId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

/// On-disk shape of accounts.json
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AccountData {
    pub accounts: Vec<Account>,
}

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<HashMap<AccountId, Account>>,
}

impl AccountRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load accounts from disk, replacing whatever is in memory
    pub fn load(&self) -> ExpenseResult<()> {
        let file_data: AccountData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        data.clear();
        for account in file_data.accounts {
            data.insert(account.id, account);
        }

        tracing::debug!(count = data.len(), "loaded accounts");
        Ok(())
    }

    /// Save accounts to disk
    pub fn save(&self) -> ExpenseResult<()> {
        let file_data = AccountData {
            accounts: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: AccountId) -> ExpenseResult<Option<Account>> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// All accounts, oldest first
    pub fn get_all(&self) -> ExpenseResult<Vec<Account>> {
        let data = read_lock(&self.data)?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(accounts)
    }

    /// Accounts whose status is active, oldest first
    pub fn get_active(&self) -> ExpenseResult<Vec<Account>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(Account::is_active)
            .collect())
    }

    /// Look up an account by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> ExpenseResult<Option<Account>> {
        let data = read_lock(&self.data)?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|a| a.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or replace an account
    pub fn upsert(&self, account: Account) -> ExpenseResult<()> {
        write_lock(&self.data)?.insert(account.id, account);
        Ok(())
    }

    /// Remove an account, returning it if it existed
    pub fn delete(&self, id: AccountId) -> ExpenseResult<Option<Account>> {
        Ok(write_lock(&self.data)?.remove(&id))
    }

    /// Check whether another account already uses `name`
    pub fn name_exists(&self, name: &str, exclude_id: Option<AccountId>) -> ExpenseResult<bool> {
        let data = read_lock(&self.data)?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .any(|a| a.name.to_lowercase() == name_lower && Some(a.id) != exclude_id))
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        Ok(read_lock(&self.data)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, ActivityStatus, Currency};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, AccountRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = AccountRepository::new(temp_dir.path().join("accounts.json"));
        (temp_dir, repo)
    }

    fn checking() -> Account {
        Account::new("Checking", AccountType::Checking, Currency::Usd)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();

        let account = checking();
        let id = account.id;
        repo.upsert(account).unwrap();

        assert_eq!(repo.get(id).unwrap().unwrap().name, "Checking");
        assert!(repo.get(AccountId::new()).unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        let account = Account::new("Savings", AccountType::Savings, Currency::Eur);
        let id = account.id;
        repo.upsert(account).unwrap();
        repo.save().unwrap();

        let reloaded = AccountRepository::new(temp_dir.path().join("accounts.json"));
        reloaded.load().unwrap();

        let account = reloaded.get(id).unwrap().unwrap();
        assert_eq!(account.name, "Savings");
        assert_eq!(account.currency, Currency::Eur);
    }

    #[test]
    fn test_get_active_skips_inactive() {
        let (_temp_dir, repo) = create_test_repo();

        let mut closed = Account::new("Old Card", AccountType::CreditCard, Currency::Usd);
        closed.status = ActivityStatus::Inactive;
        repo.upsert(checking()).unwrap();
        repo.upsert(closed).unwrap();

        assert_eq!(repo.get_all().unwrap().len(), 2);
        let active = repo.get_active().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Checking");
    }

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        let (_temp_dir, repo) = create_test_repo();

        let account = checking();
        let id = account.id;
        repo.upsert(account).unwrap();

        assert!(repo.get_by_name("CHECKING").unwrap().is_some());
        assert!(repo.name_exists("checking", None).unwrap());
        assert!(!repo.name_exists("checking", Some(id)).unwrap());
    }

    #[test]
    fn test_delete_returns_removed() {
        let (_temp_dir, repo) = create_test_repo();

        let account = checking();
        let id = account.id;
        repo.upsert(account).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
