//! CSV export of transactions and accounts

use std::collections::HashMap;
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::Storage;

fn export_err(e: impl std::fmt::Display) -> ExpenseError {
    ExpenseError::Export(e.to_string())
}

/// Export all transactions, newest first, with account and category names
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> ExpenseResult<()> {
    let account_names: HashMap<_, _> = storage
        .accounts
        .get_all()?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    let category_names: HashMap<_, _> = storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record([
            "ID",
            "Date",
            "Account",
            "Category",
            "Type",
            "Amount",
            "Currency",
            "Status",
            "Merchant",
            "Description",
        ])
        .map_err(export_err)?;

    for txn in storage.transactions.get_all()? {
        let account = account_names
            .get(&txn.account_id)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string());
        let category = category_names
            .get(&txn.category_id)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string());

        csv_writer
            .write_record([
                txn.id.to_string(),
                txn.date.to_string(),
                account,
                category,
                if txn.is_income { "Income" } else { "Expense" }.to_string(),
                txn.amount.to_string(),
                txn.currency.to_string(),
                txn.status.to_string(),
                txn.merchant_name.clone(),
                txn.description.clone(),
            ])
            .map_err(export_err)?;
    }

    csv_writer.flush().map_err(export_err)
}

/// Export account balances
pub fn export_accounts_csv<W: Write>(storage: &Storage, writer: W) -> ExpenseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record([
            "ID",
            "Name",
            "Type",
            "Currency",
            "Initial Balance",
            "Current Balance",
            "Status",
        ])
        .map_err(export_err)?;

    for account in storage.accounts.get_all()? {
        csv_writer
            .write_record([
                account.id.to_string(),
                account.name.clone(),
                account.account_type.to_string(),
                account.currency.to_string(),
                account.initial_balance.to_string(),
                account.current_balance.to_string(),
                account.status.to_string(),
            ])
            .map_err(export_err)?;
    }

    csv_writer.flush().map_err(export_err)
}
