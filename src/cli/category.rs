//! Category CLI commands

use clap::Subcommand;

use super::{parse_money, resolve_category};
use crate::display::category::{format_category_details, format_category_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::category::DEFAULT_COLOR;
use crate::models::CategoryKind;
use crate::services::{CategoryService, CategoryUpdate};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a new category
    Add {
        /// Category name
        name: String,
        /// Display color as #RRGGBB
        #[arg(long, default_value = DEFAULT_COLOR)]
        color: String,
        /// Icon name
        #[arg(long, default_value = "")]
        icon: String,
        /// Spending limit (e.g., "500" or "500.00")
        #[arg(long)]
        limit: Option<String>,
        /// income or expense
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// List categories
    List {
        /// Include inactive categories
        #[arg(short, long)]
        all: bool,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// New spending limit
        #[arg(long, conflicts_with = "clear_limit")]
        limit: Option<String>,
        /// Remove the spending limit
        #[arg(long)]
        clear_limit: bool,
        /// income or expense
        #[arg(long = "type", conflicts_with = "clear_type")]
        kind: Option<String>,
        /// Remove the income/expense type
        #[arg(long)]
        clear_type: bool,
    },

    /// Hide a category from new transactions
    Deactivate {
        /// Category name or ID
        category: String,
    },

    /// Make an inactive category usable again
    Reactivate {
        /// Category name or ID
        category: String,
    },

    /// Delete a category that nothing references
    Delete {
        /// Category name or ID
        category: String,
    },
}

fn parse_kind(s: &str) -> ExpenseResult<CategoryKind> {
    CategoryKind::parse(s).ok_or_else(|| {
        ExpenseError::Validation(format!(
            "Invalid category type: '{}'. Valid types: income, expense",
            s
        ))
    })
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> ExpenseResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add {
            name,
            color,
            icon,
            limit,
            kind,
        } => {
            let limit = limit.as_deref().map(parse_money).transpose()?;
            let kind = kind.as_deref().map(parse_kind).transpose()?;

            let category = service.create(&name, &color, &icon, limit, kind)?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List { all } => {
            let categories = if all {
                service.list_all()?
            } else {
                service.list_active()?
            };
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Show { category } => {
            let found = resolve_category(&service, &category)?;
            let count = storage.transactions.count_by_category(found.id)?;
            print!("{}", format_category_details(&found, count));
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
            icon,
            limit,
            clear_limit,
            kind,
            clear_type,
        } => {
            let found = resolve_category(&service, &category)?;

            let budget_limit = if clear_limit {
                Some(None)
            } else {
                limit.as_deref().map(parse_money).transpose()?.map(Some)
            };
            let kind = if clear_type {
                Some(None)
            } else {
                kind.as_deref().map(parse_kind).transpose()?.map(Some)
            };

            let changes = CategoryUpdate {
                name,
                color,
                icon,
                budget_limit,
                kind,
            };
            if changes.is_empty() {
                println!("No changes specified. Use --name, --color, --icon, --limit or --type.");
                return Ok(());
            }

            let updated = service.update(found.id, changes)?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Deactivate { category } => {
            let found = resolve_category(&service, &category)?;
            let updated = service.deactivate(found.id)?;
            println!("Deactivated category: {}", updated.name);
        }

        CategoryCommands::Reactivate { category } => {
            let found = resolve_category(&service, &category)?;
            let updated = service.reactivate(found.id)?;
            println!("Reactivated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let found = resolve_category(&service, &category)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted category: {}", deleted.name);
        }
    }

    Ok(())
}
