//! Transaction CLI commands

use clap::Subcommand;

use super::{parse_currency, parse_date, parse_money, resolve_account, resolve_category};
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Transaction, TransactionStatus};
use crate::reports::category_names;
use crate::services::{
    AccountService, CategoryService, CreateTransactionInput, TransactionFilter,
    TransactionService, TransactionUpdate,
};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an expense (or income with --income)
    Add {
        /// Account name or ID
        account: String,
        /// Amount as a positive number (e.g., "12.50")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Record as income instead of expense
        #[arg(short, long)]
        income: bool,
        /// Transaction date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'D', long)]
        description: Option<String>,
        #[arg(short, long)]
        merchant: Option<String>,
        /// Currency code; defaults to the account's currency
        #[arg(long)]
        currency: Option<String>,
        /// Exchange rate at entry time
        #[arg(long)]
        rate: Option<f64>,
        /// Record as pending
        #[arg(long)]
        pending: bool,
    },

    /// List transactions, newest first
    List {
        /// Filter by account
        #[arg(short, long)]
        account: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// pending, completed or cancelled
        #[arg(long)]
        status: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },

    /// Edit the descriptive fields of a transaction
    Edit {
        /// Transaction ID
        id: String,
        #[arg(short = 'D', long)]
        description: Option<String>,
        #[arg(short, long)]
        merchant: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Cancel a transaction and reverse its effect on the balance
    Cancel {
        /// Transaction ID
        id: String,
    },

    /// Mark a pending transaction as completed
    Complete {
        /// Transaction ID
        id: String,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

fn resolve_transaction(service: &TransactionService, id: &str) -> ExpenseResult<Transaction> {
    service
        .find(id)?
        .ok_or_else(|| ExpenseError::transaction_not_found(id))
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    cmd: TransactionCommands,
) -> ExpenseResult<()> {
    let service = TransactionService::new(storage);
    let accounts = AccountService::new(storage);
    let categories = CategoryService::new(storage);

    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            category,
            income,
            date,
            description,
            merchant,
            currency,
            rate,
            pending,
        } => {
            let account = resolve_account(&accounts, &account)?;
            let category = resolve_category(&categories, &category)?;

            let mut input = CreateTransactionInput::new(
                account.id,
                category.id,
                parse_date(date.as_deref())?,
                parse_money(&amount)?,
                income,
            );
            input.description = description;
            input.merchant_name = merchant;
            input.currency = currency.as_deref().map(parse_currency).transpose()?;
            input.exchange_rate = rate;
            input.pending = pending;

            let txn = service.create(input)?;
            let balance = accounts.balance(account.id)?;

            println!(
                "Recorded {} of {} on {} ({})",
                if txn.is_income { "income" } else { "expense" },
                txn.amount,
                txn.date,
                category.name
            );
            println!("  ID: {}", txn.id);
            println!("  {} balance: {}", account.name, balance);
        }

        TransactionCommands::List {
            account,
            category,
            from,
            to,
            status,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(account) = account {
                filter = filter.account(resolve_account(&accounts, &account)?.id);
            }
            if let Some(category) = category {
                filter = filter.category(resolve_category(&categories, &category)?.id);
            }
            if from.is_some() || to.is_some() {
                let start = match from {
                    Some(s) => parse_date(Some(&s))?,
                    None => chrono::NaiveDate::MIN,
                };
                let end = match to {
                    Some(s) => parse_date(Some(&s))?,
                    None => chrono::NaiveDate::MAX,
                };
                filter = filter.date_range(start, end);
            }
            if let Some(status) = status {
                let status = TransactionStatus::parse(&status).ok_or_else(|| {
                    ExpenseError::Validation(format!(
                        "Invalid status: '{}'. Valid: pending, completed, cancelled",
                        status
                    ))
                })?;
                filter = filter.status(status);
            }

            let transactions = service.list(filter)?;
            print!(
                "{}",
                format_transaction_register(&transactions, &category_names(storage)?)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = resolve_transaction(&service, &id)?;
            let account_name = storage
                .accounts
                .get(txn.account_id)?
                .map(|a| a.name)
                .unwrap_or_else(|| txn.account_id.short());
            let category_name = storage
                .categories
                .get(txn.category_id)?
                .map(|c| c.name)
                .unwrap_or_else(|| txn.category_id.short());

            print!(
                "{}",
                format_transaction_details(&txn, &account_name, &category_name)
            );
        }

        TransactionCommands::Edit {
            id,
            description,
            merchant,
            date,
            category,
        } => {
            let txn = resolve_transaction(&service, &id)?;

            let changes = TransactionUpdate {
                description,
                merchant_name: merchant,
                date: date.as_deref().map(|d| parse_date(Some(d))).transpose()?,
                category_id: category
                    .as_deref()
                    .map(|c| resolve_category(&categories, c).map(|c| c.id))
                    .transpose()?,
            };

            let updated = service.update(txn.id, changes)?;
            println!("Updated transaction {}", updated.id);
        }

        TransactionCommands::Cancel { id } => {
            let txn = resolve_transaction(&service, &id)?;
            let cancelled = service.cancel(txn.id)?;
            println!("Cancelled transaction {}", cancelled.id);
        }

        TransactionCommands::Complete { id } => {
            let txn = resolve_transaction(&service, &id)?;
            let completed = service.complete(txn.id)?;
            println!("Completed transaction {}", completed.id);
        }

        TransactionCommands::Delete { id } => {
            let txn = resolve_transaction(&service, &id)?;
            let deleted = service.delete(txn.id)?;
            println!("Deleted transaction {}", deleted.id);
        }
    }

    Ok(())
}
