//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, Money};

/// Format a list of accounts with balances as a table
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let type_width = accounts
        .iter()
        .map(|a| a.account_type.to_string().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:<5}  {:>12}  {}\n",
        "Name",
        "Type",
        "Cur",
        "Balance",
        "Status",
        name_width = name_width,
        type_width = type_width,
    ));

    output.push_str(&format!(
        "{:-<name_width$}  {:-<type_width$}  {:-<5}  {:->12}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        type_width = type_width,
    ));

    for account in accounts {
        output.push_str(&format!(
            "{:<name_width$}  {:<type_width$}  {:<5}  {:>12}  {}\n",
            account.name,
            account.account_type,
            account.currency.code(),
            account.current_balance.to_string(),
            if account.is_active() { "" } else { "Inactive" },
            name_width = name_width,
            type_width = type_width,
        ));
    }

    // Totals only make sense within one currency
    let first_currency = accounts[0].currency;
    if accounts.iter().all(|a| a.currency == first_currency) {
        let total: Money = accounts.iter().map(|a| a.current_balance).sum();

        output.push_str(&format!(
            "{:-<name_width$}  {:-<type_width$}  {:-<5}  {:->12}\n",
            "",
            "",
            "",
            "",
            name_width = name_width,
            type_width = type_width,
        ));
        output.push_str(&format!(
            "{:<name_width$}  {:<type_width$}  {:<5}  {:>12}\n",
            "TOTAL",
            "",
            first_currency.code(),
            total.to_string(),
            name_width = name_width,
            type_width = type_width,
        ));
    }

    output
}

/// Format a single account's details
pub fn format_account_details(account: &Account) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  Type:             {}\n", account.account_type));
    output.push_str(&format!("  ID:               {}\n", account.id));
    output.push_str(&format!("  Currency:         {}\n", account.currency));
    output.push_str(&format!("  Status:           {}\n", account.status));
    output.push('\n');
    output.push_str(&format!(
        "  Initial Balance:  {}\n",
        account
            .initial_balance
            .format_with_symbol(account.currency.symbol())
    ));
    output.push_str(&format!(
        "  Current Balance:  {}\n",
        account
            .current_balance
            .format_with_symbol(account.currency.symbol())
    ));

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        account.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        account.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, ActivityStatus, Currency};

    fn account(name: &str, cents: i64, currency: Currency) -> Account {
        Account::with_initial_balance(name, AccountType::Checking, currency, Money::from_cents(cents))
    }

    #[test]
    fn test_format_account_list() {
        let mut savings = account("Savings", 500000, Currency::Usd);
        savings.status = ActivityStatus::Inactive;

        let output = format_account_list(&[account("Checking", 100000, Currency::Usd), savings]);
        assert!(output.contains("Checking"));
        assert!(output.contains("Inactive"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("6000.00"));
    }

    #[test]
    fn test_mixed_currencies_have_no_total() {
        let output = format_account_list(&[
            account("Checking", 100, Currency::Usd),
            account("Girokonto", 100, Currency::Eur),
        ]);
        assert!(!output.contains("TOTAL"));
    }

    #[test]
    fn test_format_empty_list() {
        assert!(format_account_list(&[]).contains("No accounts found"));
    }

    #[test]
    fn test_format_account_details() {
        let output = format_account_details(&account("My Account", 100000, Currency::Gbp));
        assert!(output.contains("My Account"));
        assert!(output.contains("Checking"));
        assert!(output.contains("Current Balance"));
        assert!(output.contains("GBP"));
    }
}
