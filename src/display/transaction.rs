//! Transaction display formatting
//!
//! Register views and status indicators for transactions.

use std::collections::HashMap;

use super::report::truncate;
use crate::models::{CategoryId, Transaction, TransactionStatus};

fn status_icon(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Pending => "~",
        TransactionStatus::Completed => "✓",
        TransactionStatus::Cancelled => "x",
    }
}

fn label(txn: &Transaction) -> String {
    if !txn.merchant_name.is_empty() {
        txn.merchant_name.clone()
    } else if !txn.description.is_empty() {
        txn.description.clone()
    } else {
        "(no description)".to_string()
    }
}

/// Format a single register row
pub fn format_transaction_row(txn: &Transaction, category_name: &str) -> String {
    format!(
        "{:2} {} {:<24} {:<16} {:>12}  {}",
        status_icon(txn.status),
        txn.date.format("%Y-%m-%d"),
        truncate(&label(txn), 24),
        truncate(category_name, 16),
        txn.signed_amount(),
        txn.id.short()
    )
}

/// Format transactions as a register, newest first as given
pub fn format_transaction_register(
    transactions: &[Transaction],
    category_names: &HashMap<CategoryId, String>,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:2} {:10} {:<24} {:<16} {:>12}  {}\n",
        "St", "Date", "Description", "Category", "Amount", "ID"
    ));
    output.push_str(&"-".repeat(82));
    output.push('\n');

    for txn in transactions {
        let category = category_names
            .get(&txn.category_id)
            .cloned()
            .unwrap_or_else(|| txn.category_id.short());
        output.push_str(&format_transaction_row(txn, &category));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    account_name: &str,
    category_name: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Type:        {}\n",
        if txn.is_income { "Income" } else { "Expense" }
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(txn.currency.symbol())
    ));
    if (txn.exchange_rate - 1.0).abs() > f64::EPSILON {
        output.push_str(&format!("Rate:        {}\n", txn.exchange_rate));
    }
    output.push_str(&format!("Account:     {}\n", account_name));
    output.push_str(&format!("Category:    {}\n", category_name));

    if !txn.merchant_name.is_empty() {
        output.push_str(&format!("Merchant:    {}\n", txn.merchant_name));
    }
    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output.push_str(&format!("Status:      {}\n", txn.status));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, Currency, Money};
    use chrono::NaiveDate;

    fn create_test_transaction() -> Transaction {
        let mut txn = Transaction::new(
            AccountId::new(),
            CategoryId::new(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            Money::from_cents(5000),
            false,
            Currency::Usd,
        );
        txn.merchant_name = "Test Store".to_string();
        txn
    }

    #[test]
    fn test_format_transaction_row() {
        let row = format_transaction_row(&create_test_transaction(), "Groceries");
        assert!(row.contains("2025-01-15"));
        assert!(row.contains("Test Store"));
        assert!(row.contains("-50.00"));
    }

    #[test]
    fn test_register_resolves_category_names() {
        let txn = create_test_transaction();
        let names = HashMap::from([(txn.category_id, "Groceries".to_string())]);

        let output = format_transaction_register(&[txn], &names);
        assert!(output.contains("Groceries"));
        assert!(output.contains("Description"));
    }

    #[test]
    fn test_empty_register() {
        assert!(format_transaction_register(&[], &HashMap::new()).contains("No transactions"));
    }

    #[test]
    fn test_format_transaction_details() {
        let output = format_transaction_details(&create_test_transaction(), "Checking", "Groceries");
        assert!(output.contains("Amount:      $50.00"));
        assert!(output.contains("Merchant:    Test Store"));
        assert!(output.contains("Status:      Completed"));
    }
}
