//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::ExpenseResult;
use crate::models::{Budget, BudgetId, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

/// On-disk shape of budgets.json
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct BudgetData {
    pub budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> ExpenseResult<()> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        data.clear();
        for budget in file_data.budgets {
            data.insert(budget.id, budget);
        }

        tracing::debug!(count = data.len(), "loaded budgets");
        Ok(())
    }

    pub fn save(&self) -> ExpenseResult<()> {
        let file_data = BudgetData {
            budgets: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: BudgetId) -> ExpenseResult<Option<Budget>> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// All budgets ordered by start date, then name
    pub fn get_all(&self) -> ExpenseResult<Vec<Budget>> {
        let data = read_lock(&self.data)?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.name.cmp(&b.name)));
        Ok(budgets)
    }

    /// Budgets whose window contains `date`
    pub fn get_active_on(&self, date: NaiveDate) -> ExpenseResult<Vec<Budget>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.is_active_on(date))
            .collect())
    }

    /// Budgets scoped to a category
    pub fn get_by_category(&self, category_id: CategoryId) -> ExpenseResult<Vec<Budget>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.category_id == Some(category_id))
            .collect())
    }

    pub fn count_by_category(&self, category_id: CategoryId) -> ExpenseResult<usize> {
        Ok(read_lock(&self.data)?
            .values()
            .filter(|b| b.category_id == Some(category_id))
            .count())
    }

    pub fn upsert(&self, budget: Budget) -> ExpenseResult<()> {
        write_lock(&self.data)?.insert(budget.id, budget);
        Ok(())
    }

    /// Remove a budget, returning it if it existed
    pub fn delete(&self, id: BudgetId) -> ExpenseResult<Option<Budget>> {
        Ok(write_lock(&self.data)?.remove(&id))
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        Ok(read_lock(&self.data)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        (temp_dir, repo)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn budget(name: &str, start: NaiveDate, end: NaiveDate, category: Option<CategoryId>) -> Budget {
        Budget::new(name, Money::from_cents(50000), start, end, 80, category)
    }

    #[test]
    fn test_active_on_is_inclusive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(budget("January", date(2025, 1, 1), date(2025, 1, 31), None))
            .unwrap();

        assert_eq!(repo.get_active_on(date(2025, 1, 1)).unwrap().len(), 1);
        assert_eq!(repo.get_active_on(date(2025, 1, 31)).unwrap().len(), 1);
        assert!(repo.get_active_on(date(2025, 2, 1)).unwrap().is_empty());
        assert!(repo.get_active_on(date(2024, 12, 31)).unwrap().is_empty());
    }

    #[test]
    fn test_get_all_ordered_by_start() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(budget("March", date(2025, 3, 1), date(2025, 3, 31), None))
            .unwrap();
        repo.upsert(budget("January", date(2025, 1, 1), date(2025, 1, 31), None))
            .unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["January", "March"]);
    }

    #[test]
    fn test_category_queries() {
        let (_temp_dir, repo) = create_test_repo();
        let food = CategoryId::new();

        repo.upsert(budget("Food", date(2025, 1, 1), date(2025, 1, 31), Some(food)))
            .unwrap();
        repo.upsert(budget("All", date(2025, 1, 1), date(2025, 1, 31), None))
            .unwrap();

        assert_eq!(repo.get_by_category(food).unwrap().len(), 1);
        assert_eq!(repo.count_by_category(food).unwrap(), 1);
        assert_eq!(repo.count_by_category(CategoryId::new()).unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let b = budget("Q1", date(2025, 1, 1), date(2025, 3, 31), None);
        let id = b.id;
        repo.upsert(b).unwrap();
        repo.save().unwrap();

        let reloaded = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        reloaded.load().unwrap();
        let b = reloaded.get(id).unwrap().unwrap();
        assert_eq!(b.end_date, date(2025, 3, 31));
        assert_eq!(b.notify_at_percent, 80);

        assert!(reloaded.delete(id).unwrap().is_some());
        assert_eq!(reloaded.count().unwrap(), 0);
    }
}
