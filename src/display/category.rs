//! Category display formatting

use crate::models::Category;

/// Format categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'expense init' to create default categories."
            .to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<8}  {:<8}  {:>12}  {}\n",
        "Name",
        "Type",
        "Color",
        "Limit",
        "Status",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<8}  {:-<8}  {:->12}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for category in categories {
        output.push_str(&format!(
            "{:<name_width$}  {:<8}  {:<8}  {:>12}  {}\n",
            category.name,
            category.kind.map(|k| k.to_string()).unwrap_or_default(),
            category.color,
            category
                .budget_limit
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string()),
            if category.is_active() { "" } else { "Inactive" },
            name_width = name_width,
        ));
    }

    output
}

/// Format a single category's details
pub fn format_category_details(category: &Category, transaction_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:           {}\n", category.id));
    if let Some(kind) = category.kind {
        output.push_str(&format!("  Type:         {}\n", kind));
    }
    output.push_str(&format!("  Color:        {}\n", category.color));
    if !category.icon.is_empty() {
        output.push_str(&format!("  Icon:         {}\n", category.icon));
    }
    if let Some(limit) = category.budget_limit {
        output.push_str(&format!("  Limit:        {}\n", limit));
    }
    output.push_str(&format!("  Status:       {}\n", category.status));
    output.push_str(&format!("  Transactions: {}\n", transaction_count));

    output
}
