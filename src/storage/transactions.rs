//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. Two
//! in-memory indexes (by account, by category) are rebuilt on load and kept
//! in step on every upsert and delete.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{Datelike, NaiveDate};

use crate::error::ExpenseResult;
use crate::models::{AccountId, CategoryId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

/// On-disk shape of transactions.json
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TransactionData {
    pub transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with indexing
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    by_account: RwLock<HashMap<AccountId, Vec<TransactionId>>>,
    by_category: RwLock<HashMap<CategoryId, Vec<TransactionId>>>,
}

/// Newest first; ties broken by creation time
fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_account: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and rebuild the indexes
    pub fn load(&self) -> ExpenseResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        let mut by_account = write_lock(&self.by_account)?;
        let mut by_category = write_lock(&self.by_category)?;

        data.clear();
        by_account.clear();
        by_category.clear();

        for txn in file_data.transactions {
            by_account.entry(txn.account_id).or_default().push(txn.id);
            by_category.entry(txn.category_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        tracing::debug!(count = data.len(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> ExpenseResult<()> {
        let file_data = TransactionData {
            transactions: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: TransactionId) -> ExpenseResult<Option<Transaction>> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// All transactions, newest first
    pub fn get_all(&self) -> ExpenseResult<Vec<Transaction>> {
        let data = read_lock(&self.data)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Transactions of one account, newest first
    pub fn get_by_account(&self, account_id: AccountId) -> ExpenseResult<Vec<Transaction>> {
        let data = read_lock(&self.data)?;
        let by_account = read_lock(&self.by_account)?;

        let ids = by_account.get(&account_id).map(Vec::as_slice).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Transactions in one category across all accounts, newest first
    pub fn get_by_category(&self, category_id: CategoryId) -> ExpenseResult<Vec<Transaction>> {
        let data = read_lock(&self.data)?;
        let by_category = read_lock(&self.by_category)?;

        let ids = by_category.get(&category_id).map(Vec::as_slice).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Transactions dated within `start..=end`
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ExpenseResult<Vec<Transaction>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    /// Transactions of one account dated within `start..=end`
    pub fn get_by_account_in_range(
        &self,
        account_id: AccountId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ExpenseResult<Vec<Transaction>> {
        Ok(self
            .get_by_account(account_id)?
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    /// Transactions of one account on a single day
    pub fn get_by_account_on_date(
        &self,
        account_id: AccountId,
        date: NaiveDate,
    ) -> ExpenseResult<Vec<Transaction>> {
        self.get_by_account_in_range(account_id, date, date)
    }

    /// Transactions of one account in a calendar month
    pub fn get_by_account_in_month(
        &self,
        account_id: AccountId,
        year: i32,
        month: u32,
    ) -> ExpenseResult<Vec<Transaction>> {
        Ok(self
            .get_by_account(account_id)?
            .into_iter()
            .filter(|t| t.date.year() == year && t.date.month() == month)
            .collect())
    }

    /// Transactions of one account in one category
    pub fn get_by_account_and_category(
        &self,
        account_id: AccountId,
        category_id: CategoryId,
    ) -> ExpenseResult<Vec<Transaction>> {
        Ok(self
            .get_by_account(account_id)?
            .into_iter()
            .filter(|t| t.category_id == category_id)
            .collect())
    }

    /// Number of transactions referencing a category
    pub fn count_by_category(&self, category_id: CategoryId) -> ExpenseResult<usize> {
        Ok(read_lock(&self.by_category)?
            .get(&category_id)
            .map_or(0, Vec::len))
    }

    /// Insert or replace a transaction, moving its index entries if needed
    pub fn upsert(&self, txn: Transaction) -> ExpenseResult<()> {
        let mut data = write_lock(&self.data)?;
        let mut by_account = write_lock(&self.by_account)?;
        let mut by_category = write_lock(&self.by_category)?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_account.get_mut(&old.account_id) {
                ids.retain(|&id| id != txn.id);
            }
            if let Some(ids) = by_category.get_mut(&old.category_id) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_account.entry(txn.account_id).or_default().push(txn.id);
        by_category.entry(txn.category_id).or_default().push(txn.id);
        data.insert(txn.id, txn);

        Ok(())
    }

    /// Remove a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> ExpenseResult<Option<Transaction>> {
        let mut data = write_lock(&self.data)?;
        let mut by_account = write_lock(&self.by_account)?;
        let mut by_category = write_lock(&self.by_category)?;

        let removed = data.remove(&id);
        if let Some(txn) = &removed {
            if let Some(ids) = by_account.get_mut(&txn.account_id) {
                ids.retain(|&tid| tid != id);
            }
            if let Some(ids) = by_category.get_mut(&txn.category_id) {
                ids.retain(|&tid| tid != id);
            }
        }

        Ok(removed)
    }

    /// Remove every transaction of an account, returning what was removed
    pub fn delete_by_account(&self, account_id: AccountId) -> ExpenseResult<Vec<Transaction>> {
        let mut data = write_lock(&self.data)?;
        let mut by_account = write_lock(&self.by_account)?;
        let mut by_category = write_lock(&self.by_category)?;

        let ids = by_account.remove(&account_id).unwrap_or_default();
        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(txn) = data.remove(&id) {
                if let Some(cat_ids) = by_category.get_mut(&txn.category_id) {
                    cat_ids.retain(|&tid| tid != id);
                }
                removed.push(txn);
            }
        }

        Ok(removed)
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        Ok(read_lock(&self.data)?.len())
    }
}
