//! Budget display formatting

use super::report::{format_bar, format_percentage};
use crate::models::Budget;
use crate::services::BudgetProgress;

/// Format budgets as a table; `category_name` resolves the optional scope
pub fn format_budget_list<F>(budgets: &[Budget], category_name: F) -> String
where
    F: Fn(&Budget) -> Option<String>,
{
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let name_width = budgets
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:<10}  {:<10}  {:<16}  {}\n",
        "Name",
        "Limit",
        "Start",
        "End",
        "Category",
        "ID",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:-<10}  {:-<10}  {:-<16}  {:-<12}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for budget in budgets {
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:<10}  {:<10}  {:<16}  {}\n",
            budget.name,
            budget.amount_limit.to_string(),
            budget.start_date.to_string(),
            budget.end_date.to_string(),
            category_name(budget).unwrap_or_else(|| "(all)".to_string()),
            budget.id.short(),
            name_width = name_width,
        ));
    }

    output
}

/// Format a budget with its spending progress
pub fn format_budget_progress(progress: &BudgetProgress, category_name: Option<&str>) -> String {
    let budget = &progress.budget;
    let mut output = String::new();

    output.push_str(&format!("Budget: {}\n", budget.name));
    output.push_str(&format!("  ID:        {}\n", budget.id));
    output.push_str(&format!(
        "  Window:    {} to {}\n",
        budget.start_date, budget.end_date
    ));
    output.push_str(&format!(
        "  Category:  {}\n",
        category_name.unwrap_or("(all)")
    ));
    output.push('\n');
    output.push_str(&format!("  Limit:     {:>12}\n", budget.amount_limit));
    output.push_str(&format!(
        "  Spent:     {:>12}  ({} transactions)\n",
        progress.spent, progress.transaction_count
    ));
    output.push_str(&format!("  Remaining: {:>12}\n", progress.remaining));
    output.push_str(&format!(
        "  [{}] {}\n",
        format_bar(progress.percent_used, 100.0, 30),
        format_percentage(progress.percent_used)
    ));

    if progress.is_over() {
        output.push_str("  Over budget\n");
    } else if progress.threshold_reached {
        output.push_str(&format!(
            "  Notice: {}% of the limit reached\n",
            budget.notify_at_percent
        ));
    }

    output
}
