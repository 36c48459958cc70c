//! JSON export
//!
//! Dumps every account, category, transaction and budget into one
//! versioned document.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Account, Budget, Category, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Crate version that wrote the export
    pub app_version: String,

    pub accounts: Vec<Account>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,

    pub metadata: ExportMetadata,
}

/// Counts and date bounds, for a quick look without parsing everything
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub account_count: usize,
    pub category_count: usize,
    pub transaction_count: usize,
    pub budget_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Snapshot the whole store
    pub fn from_storage(storage: &Storage) -> ExpenseResult<Self> {
        let accounts = storage.accounts.get_all()?;
        let categories = storage.categories.get_all()?;
        let transactions = storage.transactions.get_all()?;
        let budgets = storage.budgets.get_all()?;

        let metadata = ExportMetadata {
            account_count: accounts.len(),
            category_count: categories.len(),
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            accounts,
            categories,
            transactions,
            budgets,
            metadata,
        })
    }

    /// Check the schema version and that every reference resolves
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let account_ids: HashSet<_> = self.accounts.iter().map(|a| a.id).collect();
        let category_ids: HashSet<_> = self.categories.iter().map(|c| c.id).collect();

        for txn in &self.transactions {
            if !account_ids.contains(&txn.account_id) {
                return Err(format!(
                    "Transaction {} references unknown account {}",
                    txn.id, txn.account_id
                ));
            }
            if !category_ids.contains(&txn.category_id) {
                return Err(format!(
                    "Transaction {} references unknown category {}",
                    txn.id, txn.category_id
                ));
            }
        }

        for budget in &self.budgets {
            if let Some(category_id) = budget.category_id {
                if !category_ids.contains(&category_id) {
                    return Err(format!(
                        "Budget {} references unknown category {}",
                        budget.id, category_id
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))
}

/// Parse and validate a previously written JSON export
pub fn read_json_export(json_str: &str) -> ExpenseResult<FullExport> {
    let export: FullExport = serde_json::from_str(json_str)?;
    export.validate().map_err(ExpenseError::Validation)?;
    Ok(export)
}
