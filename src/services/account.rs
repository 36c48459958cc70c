//! Account service
//!
//! Account lifecycle and balance bookkeeping. The stored current balance is
//! only ever moved by the transaction service; this service can recompute it
//! from scratch to check that the two agree.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Account, AccountId, AccountType, Currency, Money, Transaction};
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new active account whose current balance equals `initial_balance`
    pub fn create(
        &self,
        name: &str,
        account_type: AccountType,
        currency: Currency,
        initial_balance: Money,
    ) -> ExpenseResult<Account> {
        let name = name.trim();

        let account = Account::with_initial_balance(name, account_type, currency, initial_balance);
        account
            .validate()
            .map_err(|e| ExpenseError::InvalidAccount(e.to_string()))?;

        if self.storage.accounts.name_exists(name, None)? {
            return Err(ExpenseError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_create(
            EntityType::Account,
            account.id,
            Some(account.name.clone()),
            &account,
        )?;

        tracing::info!(account = %account.id, name = %account.name, "account created");
        Ok(account)
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> ExpenseResult<Account> {
        self.storage
            .accounts
            .get(id)?
            .ok_or_else(|| ExpenseError::account_not_found(id.to_string()))
    }

    /// Find an account by name or ID string
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Account>> {
        if let Some(account) = self.storage.accounts.get_by_name(identifier)? {
            return Ok(Some(account));
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            return self.storage.accounts.get(id);
        }

        Ok(None)
    }

    /// All accounts, or only the active ones
    pub fn list(&self, include_inactive: bool) -> ExpenseResult<Vec<Account>> {
        if include_inactive {
            self.storage.accounts.get_all()
        } else {
            self.storage.accounts.get_active()
        }
    }

    /// Stored current balance
    pub fn balance(&self, id: AccountId) -> ExpenseResult<Money> {
        Ok(self.get(id)?.current_balance)
    }

    /// Balance recomputed from the initial balance and live transactions
    pub fn recalculate_balance(&self, id: AccountId) -> ExpenseResult<Money> {
        let account = self.get(id)?;

        let transactions = self.storage.transactions.get_by_account(id)?;
        let movement: Money = transactions.iter().map(|t| t.balance_effect()).sum();

        Ok(account.initial_balance + movement)
    }

    pub fn rename(&self, id: AccountId, name: &str) -> ExpenseResult<Account> {
        let mut account = self.get(id)?;
        let before = account.clone();

        let name = name.trim();
        if self.storage.accounts.name_exists(name, Some(id))? {
            return Err(ExpenseError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }

        account.name = name.to_string();
        account
            .validate()
            .map_err(|e| ExpenseError::InvalidAccount(e.to_string()))?;
        account.updated_at = chrono::Utc::now();

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_update(
            EntityType::Account,
            account.id,
            Some(account.name.clone()),
            &before,
            &account,
        )?;

        Ok(account)
    }

    /// Activate or deactivate an account
    pub fn set_active(&self, id: AccountId, active: bool) -> ExpenseResult<Account> {
        let mut account = self.get(id)?;
        let before = account.clone();

        let next = if active {
            account.status.activate()
        } else {
            account.status.deactivate()
        };
        account.status = next.map_err(|e| ExpenseError::invalid_transition("Account", e))?;
        account.updated_at = chrono::Utc::now();

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_update(
            EntityType::Account,
            account.id,
            Some(account.name.clone()),
            &before,
            &account,
        )?;

        Ok(account)
    }

    /// Delete an account together with all of its transactions
    pub fn delete(&self, id: AccountId) -> ExpenseResult<Account> {
        let account = self.get(id)?;

        let removed = self.storage.transactions.delete_by_account(id)?;
        self.storage.accounts.delete(id)?;

        if let Err(e) = self.storage.transactions.save() {
            self.restore(&account, &removed)?;
            return Err(e);
        }

        if let Err(e) = self.storage.accounts.save() {
            tracing::warn!(error = %e, "account write failed, restoring transactions");
            self.restore(&account, &removed)?;
            if let Err(revert) = self.storage.transactions.save() {
                tracing::error!(error = %revert, "failed to restore transaction file");
            }
            return Err(e);
        }

        let mut entries: Vec<AuditEntry> = removed
            .iter()
            .map(|txn| {
                AuditEntry::delete(
                    EntityType::Transaction,
                    txn.id.to_string(),
                    Some(format!("{} {}", txn.date, txn.description)),
                    txn,
                )
            })
            .collect();
        entries.push(AuditEntry::delete(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &account,
        ));
        self.storage.log_batch(&entries)?;

        tracing::info!(
            account = %account.id,
            transactions = removed.len(),
            "account deleted"
        );
        Ok(account)
    }

    /// Put back an account and its transactions after a failed cascade
    fn restore(&self, account: &Account, removed: &[Transaction]) -> ExpenseResult<()> {
        for txn in removed {
            self.storage.transactions.upsert(txn.clone())?;
        }
        self.storage.accounts.upsert(account.clone())
    }
}
