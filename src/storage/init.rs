//! Storage initialization
//!
//! First-run setup: directory creation and the starter category set.

use crate::config::paths::AppPaths;
use crate::error::ExpenseResult;
use crate::models::{Category, CategoryKind};

/// (name, color, icon, kind)
const DEFAULT_CATEGORIES: &[(&str, &str, &str, CategoryKind)] = &[
    ("Salary", "#2E7D32", "briefcase", CategoryKind::Income),
    ("Other Income", "#66BB6A", "plus", CategoryKind::Income),
    ("Groceries", "#F9A825", "cart", CategoryKind::Expense),
    ("Dining Out", "#EF6C00", "fork.knife", CategoryKind::Expense),
    ("Rent", "#6D4C41", "house", CategoryKind::Expense),
    ("Utilities", "#1565C0", "bolt", CategoryKind::Expense),
    ("Transportation", "#00838F", "car", CategoryKind::Expense),
    ("Entertainment", "#8E24AA", "film", CategoryKind::Expense),
    ("Health", "#C62828", "heart", CategoryKind::Expense),
    ("Shopping", "#AD1457", "bag", CategoryKind::Expense),
];

/// Create the base and data directories
pub fn initialize_storage(paths: &AppPaths) -> ExpenseResult<()> {
    paths.ensure_directories()?;
    tracing::info!(base = %paths.base_dir().display(), "storage initialized");
    Ok(())
}

/// The starter categories created by `init`
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|&(name, color, icon, kind)| {
            let mut category = Category::new(name, color, icon);
            category.kind = Some(kind);
            category
        })
        .collect()
}
