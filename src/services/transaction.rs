//! Transaction service
//!
//! Creating, cancelling and deleting a transaction each move the owning
//! account's current balance. The transaction and the account are written
//! as a pair: if the second write fails, both in-memory repositories are
//! restored and the first file is rewritten from the restored state.

use chrono::{NaiveDate, Utc};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::transaction::TransactionValidationError;
use crate::models::{
    Account, AccountId, CategoryId, Currency, Money, Transaction, TransactionId,
    TransactionStatus,
};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub account_id: Option<AccountId>,
    pub category_id: Option<CategoryId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<TransactionStatus>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Inclusive on both ends
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub account_id: AccountId,
    pub category_id: CategoryId,
    pub date: NaiveDate,
    /// Positive magnitude; direction comes from `is_income`
    pub amount: Money,
    pub is_income: bool,
    pub description: Option<String>,
    pub merchant_name: Option<String>,
    /// Defaults to the account's currency
    pub currency: Option<Currency>,
    pub exchange_rate: Option<f64>,
    /// Record as Pending instead of Completed
    pub pending: bool,
}

impl CreateTransactionInput {
    pub fn new(
        account_id: AccountId,
        category_id: CategoryId,
        date: NaiveDate,
        amount: Money,
        is_income: bool,
    ) -> Self {
        Self {
            account_id,
            category_id,
            date,
            amount,
            is_income,
            description: None,
            merchant_name: None,
            currency: None,
            exchange_rate: None,
            pending: false,
        }
    }
}

/// Editable fields; balance-affecting fields are deliberately absent
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub description: Option<String>,
    pub merchant_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
}

/// Transaction side of a paired write, carrying what is needed to undo it
enum TxnWrite {
    Upsert {
        new: Transaction,
        old: Option<Transaction>,
    },
    Remove(Transaction),
}

fn audit_label(txn: &Transaction) -> Option<String> {
    let label = if txn.merchant_name.is_empty() {
        &txn.description
    } else {
        &txn.merchant_name
    };
    Some(format!("{} {}", txn.date, label).trim_end().to_string())
}

fn validation_error(err: TransactionValidationError) -> ExpenseError {
    match err {
        TransactionValidationError::NonPositiveAmount(_)
        | TransactionValidationError::InvalidExchangeRate(_) => {
            ExpenseError::InvalidAmount(err.to_string())
        }
        TransactionValidationError::DescriptionTooLong(_) => {
            ExpenseError::Validation(err.to_string())
        }
    }
}

fn check_range(start: NaiveDate, end: NaiveDate) -> ExpenseResult<()> {
    if start > end {
        return Err(ExpenseError::InvalidDateRange { start, end });
    }
    Ok(())
}

fn post(account: &mut Account, effect: Money) -> ExpenseResult<()> {
    account
        .post(effect)
        .map_err(|e| ExpenseError::InvalidAmount(e.to_string()))
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a transaction and apply it to the account balance
    pub fn create(&self, input: CreateTransactionInput) -> ExpenseResult<Transaction> {
        let mut txn = Transaction::new(
            input.account_id,
            input.category_id,
            input.date,
            input.amount,
            input.is_income,
            input.currency.unwrap_or_default(),
        );
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(merchant) = input.merchant_name {
            txn.merchant_name = merchant.trim().to_string();
        }
        if let Some(rate) = input.exchange_rate {
            txn.exchange_rate = rate;
        }
        if input.pending {
            txn.status = TransactionStatus::Pending;
        }
        txn.validate().map_err(validation_error)?;

        let mut account = self.load_account(input.account_id)?;
        if !account.is_active() {
            return Err(ExpenseError::InvalidAccount(format!(
                "Account '{}' is inactive",
                account.name
            )));
        }
        if input.currency.is_none() {
            txn.currency = account.currency;
        }

        let category = self
            .storage
            .categories
            .get(input.category_id)?
            .ok_or_else(|| ExpenseError::category_not_found(input.category_id.to_string()))?;
        if !category.is_active() {
            return Err(ExpenseError::Validation(format!(
                "Category '{}' is inactive",
                category.name
            )));
        }

        let account_before = account.clone();
        post(&mut account, txn.balance_effect())?;

        self.write_pair(
            TxnWrite::Upsert {
                new: txn.clone(),
                old: None,
            },
            &account_before,
            &account,
        )?;

        self.storage.log_batch(&[
            AuditEntry::create(
                EntityType::Transaction,
                txn.id.to_string(),
                audit_label(&txn),
                &txn,
            ),
            AuditEntry::update(
                EntityType::Account,
                account.id.to_string(),
                Some(account.name.clone()),
                &account_before,
                &account,
            ),
        ])?;

        tracing::info!(
            transaction = %txn.id,
            account = %account.id,
            amount = %txn.signed_amount(),
            "transaction created"
        );
        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> ExpenseResult<Transaction> {
        self.storage
            .transactions
            .get(id)?
            .ok_or_else(|| ExpenseError::transaction_not_found(id.to_string()))
    }

    /// Find a transaction by its full ID or the short form shown in listings
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Transaction>> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }

        Ok(self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .find(|t| t.id.short() == identifier))
    }

    /// All transactions of an account, newest first
    pub fn list_for_account(&self, account_id: AccountId) -> ExpenseResult<Vec<Transaction>> {
        self.storage.transactions.get_by_account(account_id)
    }

    pub fn list_for_category(&self, category_id: CategoryId) -> ExpenseResult<Vec<Transaction>> {
        self.storage.transactions.get_by_category(category_id)
    }

    pub fn list_for_account_and_category(
        &self,
        account_id: AccountId,
        category_id: CategoryId,
    ) -> ExpenseResult<Vec<Transaction>> {
        self.storage
            .transactions
            .get_by_account_and_category(account_id, category_id)
    }

    /// Transactions of an account between two dates, inclusive
    pub fn list_in_range(
        &self,
        account_id: AccountId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ExpenseResult<Vec<Transaction>> {
        check_range(start, end)?;
        self.storage
            .transactions
            .get_by_account_in_range(account_id, start, end)
    }

    pub fn list_on_date(
        &self,
        account_id: AccountId,
        date: NaiveDate,
    ) -> ExpenseResult<Vec<Transaction>> {
        self.storage.transactions.get_by_account_on_date(account_id, date)
    }

    pub fn list_in_month(
        &self,
        account_id: AccountId,
        year: i32,
        month: u32,
    ) -> ExpenseResult<Vec<Transaction>> {
        if !(1..=12).contains(&month) {
            return Err(ExpenseError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        self.storage
            .transactions
            .get_by_account_in_month(account_id, year, month)
    }

    /// List transactions matching every set field of `filter`
    pub fn list(&self, filter: TransactionFilter) -> ExpenseResult<Vec<Transaction>> {
        if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            check_range(start, end)?;
        }

        let mut transactions = match (filter.account_id, filter.category_id) {
            (Some(account_id), Some(category_id)) => self
                .storage
                .transactions
                .get_by_account_and_category(account_id, category_id)?,
            (Some(account_id), None) => self.storage.transactions.get_by_account(account_id)?,
            (None, Some(category_id)) => self.storage.transactions.get_by_category(category_id)?,
            (None, None) => self.storage.transactions.get_all()?,
        };

        if let Some(start) = filter.start_date {
            transactions.retain(|t| t.date >= start);
        }
        if let Some(end) = filter.end_date {
            transactions.retain(|t| t.date <= end);
        }
        if let Some(status) = filter.status {
            transactions.retain(|t| t.status == status);
        }
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Newest `limit` transactions of an account
    pub fn recent(&self, account_id: AccountId, limit: usize) -> ExpenseResult<Vec<Transaction>> {
        self.list(TransactionFilter::new().account(account_id).limit(limit))
    }

    /// Edit the descriptive fields of a transaction
    pub fn update(&self, id: TransactionId, changes: TransactionUpdate) -> ExpenseResult<Transaction> {
        let mut txn = self.get(id)?;
        let before = txn.clone();

        if let Some(category_id) = changes.category_id {
            let category = self
                .storage
                .categories
                .get(category_id)?
                .ok_or_else(|| ExpenseError::category_not_found(category_id.to_string()))?;
            if !category.is_active() {
                return Err(ExpenseError::Validation(format!(
                    "Category '{}' is inactive",
                    category.name
                )));
            }
            txn.category_id = category_id;
        }
        if let Some(description) = changes.description {
            txn.description = description.trim().to_string();
        }
        if let Some(merchant) = changes.merchant_name {
            txn.merchant_name = merchant.trim().to_string();
        }
        if let Some(date) = changes.date {
            txn.date = date;
        }

        txn.validate().map_err(validation_error)?;
        txn.updated_at = Utc::now();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id,
            audit_label(&txn),
            &before,
            &txn,
        )?;

        Ok(txn)
    }

    /// Cancel a transaction and take it back out of the account balance
    pub fn cancel(&self, id: TransactionId) -> ExpenseResult<Transaction> {
        let mut txn = self.get(id)?;
        let before = txn.clone();

        txn.status = txn
            .status
            .cancel()
            .map_err(|e| ExpenseError::invalid_transition("Transaction", e))?;
        txn.updated_at = Utc::now();

        let reversal = before.balance_effect() - txn.balance_effect();
        let mut entries = vec![AuditEntry::update(
            EntityType::Transaction,
            txn.id.to_string(),
            audit_label(&txn),
            &before,
            &txn,
        )];

        match self.storage.accounts.get(txn.account_id)? {
            Some(mut account) => {
                let account_before = account.clone();
                post(&mut account, -reversal)?;
                self.write_pair(
                    TxnWrite::Upsert {
                        new: txn.clone(),
                        old: Some(before),
                    },
                    &account_before,
                    &account,
                )?;
                entries.push(AuditEntry::update(
                    EntityType::Account,
                    account.id.to_string(),
                    Some(account.name.clone()),
                    &account_before,
                    &account,
                ));
            }
            None => {
                self.storage.transactions.upsert(txn.clone())?;
                self.storage.transactions.save()?;
            }
        }

        self.storage.log_batch(&entries)?;
        Ok(txn)
    }

    /// Pending -> Completed; the balance already includes pending transactions
    pub fn complete(&self, id: TransactionId) -> ExpenseResult<Transaction> {
        let mut txn = self.get(id)?;
        let before = txn.clone();

        txn.status = txn
            .status
            .complete()
            .map_err(|e| ExpenseError::invalid_transition("Transaction", e))?;
        txn.updated_at = Utc::now();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id,
            audit_label(&txn),
            &before,
            &txn,
        )?;

        Ok(txn)
    }

    /// Delete a transaction, reversing whatever it still contributes to the balance
    pub fn delete(&self, id: TransactionId) -> ExpenseResult<Transaction> {
        let txn = self.get(id)?;

        let mut entries = vec![AuditEntry::delete(
            EntityType::Transaction,
            txn.id.to_string(),
            audit_label(&txn),
            &txn,
        )];

        match self.storage.accounts.get(txn.account_id)? {
            Some(mut account) => {
                let account_before = account.clone();
                let effect = txn.balance_effect();
                if !effect.is_zero() {
                    post(&mut account, -effect)?;
                }
                self.write_pair(TxnWrite::Remove(txn.clone()), &account_before, &account)?;
                if !effect.is_zero() {
                    entries.push(AuditEntry::update(
                        EntityType::Account,
                        account.id.to_string(),
                        Some(account.name.clone()),
                        &account_before,
                        &account,
                    ));
                }
            }
            None => {
                self.storage.transactions.delete(id)?;
                self.storage.transactions.save()?;
            }
        }

        self.storage.log_batch(&entries)?;
        Ok(txn)
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.transactions.count()
    }

    fn load_account(&self, id: AccountId) -> ExpenseResult<Account> {
        self.storage
            .accounts
            .get(id)?
            .ok_or_else(|| ExpenseError::account_not_found(id.to_string()))
    }

    /// Apply a transaction change and an account change, then persist both
    fn write_pair(
        &self,
        txn_write: TxnWrite,
        account_before: &Account,
        account_after: &Account,
    ) -> ExpenseResult<()> {
        match &txn_write {
            TxnWrite::Upsert { new, .. } => self.storage.transactions.upsert(new.clone())?,
            TxnWrite::Remove(txn) => {
                self.storage.transactions.delete(txn.id)?;
            }
        }
        self.storage.accounts.upsert(account_after.clone())?;

        if let Err(e) = self.storage.transactions.save() {
            self.undo_pair(&txn_write, account_before)?;
            return Err(e);
        }

        if let Err(e) = self.storage.accounts.save() {
            tracing::warn!(error = %e, "account write failed, reverting transaction write");
            self.undo_pair(&txn_write, account_before)?;
            if let Err(revert) = self.storage.transactions.save() {
                tracing::error!(error = %revert, "failed to revert transaction write");
            }
            return Err(e);
        }

        Ok(())
    }

    fn undo_pair(&self, txn_write: &TxnWrite, account_before: &Account) -> ExpenseResult<()> {
        match txn_write {
            TxnWrite::Upsert { old: Some(old), .. } => {
                self.storage.transactions.upsert(old.clone())?
            }
            TxnWrite::Upsert { new, old: None } => {
                self.storage.transactions.delete(new.id)?;
            }
            TxnWrite::Remove(txn) => self.storage.transactions.upsert(txn.clone())?,
        }
        self.storage.accounts.upsert(account_before.clone())
    }
}
