//! Account CLI commands

use clap::Subcommand;

use super::{parse_currency, parse_money, resolve_account};
use crate::config::settings::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::AccountType;
use crate::services::AccountService;
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (cash, checking, savings, credit, investment, loan, other)
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Currency code; defaults to the configured currency
        #[arg(short, long)]
        currency: Option<String>,
        /// Initial balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
    },
    /// List accounts
    List {
        /// Include inactive accounts
        #[arg(short, long)]
        all: bool,
    },
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Rename an account
    Rename {
        /// Account name or ID
        account: String,
        /// New name
        name: String,
    },
    /// Reactivate an inactive account
    Activate {
        /// Account name or ID
        account: String,
    },
    /// Deactivate an account; it stays listed with --all
    Deactivate {
        /// Account name or ID
        account: String,
    },
    /// Delete an account and all of its transactions
    Delete {
        /// Account name or ID
        account: String,
    },
    /// Show the current balance
    Balance {
        /// Account name or ID
        account: String,
        /// Recompute from the transactions instead of reading the stored value
        #[arg(long)]
        recalculate: bool,
    },
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> ExpenseResult<()> {
    let service = AccountService::new(storage);

    match cmd {
        AccountCommands::Create {
            name,
            account_type,
            currency,
            balance,
        } => {
            let account_type = AccountType::parse(&account_type).ok_or_else(|| {
                ExpenseError::InvalidAccount(format!(
                    "Invalid account type: '{}'. Valid types: cash, checking, savings, credit, investment, loan, other",
                    account_type
                ))
            })?;
            let currency = match currency {
                Some(code) => parse_currency(&code)?,
                None => settings.currency,
            };
            let initial_balance = parse_money(&balance)?;

            let account = service.create(&name, account_type, currency, initial_balance)?;

            println!("Created account: {}", account.name);
            println!("  Type: {}", account.account_type);
            println!("  Currency: {}", account.currency);
            println!("  Initial Balance: {}", account.initial_balance);
            println!("  ID: {}", account.id);
        }

        AccountCommands::List { all } => {
            let accounts = service.list(all)?;
            print!("{}", format_account_list(&accounts));
        }

        AccountCommands::Show { account } => {
            let found = resolve_account(&service, &account)?;
            print!("{}", format_account_details(&found));
        }

        AccountCommands::Rename { account, name } => {
            let found = resolve_account(&service, &account)?;
            let renamed = service.rename(found.id, &name)?;
            println!("Renamed account: {} -> {}", found.name, renamed.name);
        }

        AccountCommands::Activate { account } => {
            let found = resolve_account(&service, &account)?;
            let updated = service.set_active(found.id, true)?;
            println!("Activated account: {}", updated.name);
        }

        AccountCommands::Deactivate { account } => {
            let found = resolve_account(&service, &account)?;
            let updated = service.set_active(found.id, false)?;
            println!("Deactivated account: {}", updated.name);
        }

        AccountCommands::Delete { account } => {
            let found = resolve_account(&service, &account)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted account: {}", deleted.name);
        }

        AccountCommands::Balance {
            account,
            recalculate,
        } => {
            let found = resolve_account(&service, &account)?;
            let balance = if recalculate {
                service.recalculate_balance(found.id)?
            } else {
                service.balance(found.id)?
            };
            println!(
                "{}: {}",
                found.name,
                balance.format_with_symbol(found.currency.symbol())
            );
        }
    }

    Ok(())
}
