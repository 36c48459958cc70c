//! Budget CLI commands

use clap::Subcommand;

use super::{parse_date, parse_money, resolve_category};
use crate::display::budget::{format_budget_list, format_budget_progress};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Budget;
use crate::services::{BudgetService, BudgetUpdate, CategoryService};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget
    Create {
        /// Budget name
        name: String,
        /// Spending limit (e.g., "400" or "400.00")
        limit: String,
        /// First day of the window (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Last day of the window (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Flag the budget once this share of the limit is spent
        #[arg(long, default_value = "80", allow_negative_numbers = true)]
        notify_at: i64,
        /// Only count this category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List budgets
    List {
        /// Only budgets whose window contains today
        #[arg(long)]
        active: bool,
        /// Only budgets scoped to this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show a budget with its progress
    Show {
        /// Budget name or ID
        budget: String,
    },

    /// Edit a budget
    Edit {
        /// Budget name or ID
        budget: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        limit: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        notify_at: Option<i64>,
        /// Scope to a category (name or ID)
        #[arg(short, long, conflicts_with = "all_categories")]
        category: Option<String>,
        /// Remove the category scope
        #[arg(long)]
        all_categories: bool,
    },

    /// Delete a budget
    Delete {
        /// Budget name or ID
        budget: String,
    },

    /// Show spending against every active budget
    Progress,
}

fn resolve_budget(service: &BudgetService, identifier: &str) -> ExpenseResult<Budget> {
    service
        .find(identifier)?
        .ok_or_else(|| ExpenseError::budget_not_found(identifier))
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> ExpenseResult<()> {
    let service = BudgetService::new(storage);
    let categories = CategoryService::new(storage);

    let category_name = |budget: &Budget| -> Option<String> {
        let id = budget.category_id?;
        Some(
            storage
                .categories
                .get(id)
                .ok()
                .flatten()
                .map(|c| c.name)
                .unwrap_or_else(|| id.short()),
        )
    };

    match cmd {
        BudgetCommands::Create {
            name,
            limit,
            start,
            end,
            notify_at,
            category,
        } => {
            let category_id = category
                .as_deref()
                .map(|c| resolve_category(&categories, c).map(|c| c.id))
                .transpose()?;

            let budget = service.create(
                &name,
                parse_money(&limit)?,
                parse_date(Some(&start))?,
                parse_date(Some(&end))?,
                notify_at,
                category_id,
            )?;

            println!("Created budget: {}", budget.name);
            println!("  Limit: {}", budget.amount_limit);
            println!("  Window: {} to {}", budget.start_date, budget.end_date);
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::List { active, category } => {
            let budgets = match (active, category) {
                (_, Some(category)) => {
                    let category = resolve_category(&categories, &category)?;
                    let mut budgets = service.list_for_category(category.id)?;
                    if active {
                        let today = chrono::Local::now().date_naive();
                        budgets.retain(|b| b.is_active_on(today));
                    }
                    budgets
                }
                (true, None) => service.list_active()?,
                (false, None) => service.list()?,
            };
            print!("{}", format_budget_list(&budgets, category_name));
        }

        BudgetCommands::Show { budget } => {
            let found = resolve_budget(&service, &budget)?;
            let progress = service.progress(found.id)?;
            print!(
                "{}",
                format_budget_progress(&progress, category_name(&found).as_deref())
            );
        }

        BudgetCommands::Edit {
            budget,
            name,
            limit,
            start,
            end,
            notify_at,
            category,
            all_categories,
        } => {
            let found = resolve_budget(&service, &budget)?;

            let category_id = if all_categories {
                Some(None)
            } else {
                category
                    .as_deref()
                    .map(|c| resolve_category(&categories, c).map(|c| Some(c.id)))
                    .transpose()?
            };

            let changes = BudgetUpdate {
                name,
                amount_limit: limit.as_deref().map(parse_money).transpose()?,
                start_date: start.as_deref().map(|d| parse_date(Some(d))).transpose()?,
                end_date: end.as_deref().map(|d| parse_date(Some(d))).transpose()?,
                notify_at_percent: notify_at,
                category_id,
            };

            let updated = service.update(found.id, changes)?;
            println!("Updated budget: {}", updated.name);
        }

        BudgetCommands::Delete { budget } => {
            let found = resolve_budget(&service, &budget)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted budget: {}", deleted.name);
        }

        BudgetCommands::Progress => {
            let budgets = service.list_active()?;
            if budgets.is_empty() {
                println!("No active budgets.");
            }
            for (i, budget) in budgets.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                let progress = service.progress(budget.id)?;
                print!(
                    "{}",
                    format_budget_progress(&progress, category_name(budget).as_deref())
                );
            }
        }
    }

    Ok(())
}
