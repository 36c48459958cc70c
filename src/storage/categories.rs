//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseResult;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

/// On-disk shape of categories.json
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> ExpenseResult<()> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = write_lock(&self.categories)?;
        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        tracing::debug!(count = categories.len(), "loaded categories");
        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> ExpenseResult<()> {
        let file_data = CategoryData {
            categories: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: CategoryId) -> ExpenseResult<Option<Category>> {
        Ok(read_lock(&self.categories)?.get(&id).cloned())
    }

    /// All categories, sorted by name
    pub fn get_all(&self) -> ExpenseResult<Vec<Category>> {
        let categories = read_lock(&self.categories)?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(list)
    }

    /// Active categories only, sorted by name
    pub fn get_active(&self) -> ExpenseResult<Vec<Category>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(Category::is_active)
            .collect())
    }

    /// Look up a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> ExpenseResult<Option<Category>> {
        let categories = read_lock(&self.categories)?;

        let name_lower = name.trim().to_lowercase();
        Ok(categories
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    pub fn upsert(&self, category: Category) -> ExpenseResult<()> {
        write_lock(&self.categories)?.insert(category.id, category);
        Ok(())
    }

    /// Remove a category, returning it if it existed
    pub fn delete(&self, id: CategoryId) -> ExpenseResult<Option<Category>> {
        Ok(write_lock(&self.categories)?.remove(&id))
    }

    /// Check whether another category already uses `name`
    pub fn name_exists(&self, name: &str, exclude_id: Option<CategoryId>) -> ExpenseResult<bool> {
        let categories = read_lock(&self.categories)?;

        let name_lower = name.trim().to_lowercase();
        Ok(categories
            .values()
            .any(|c| c.name.to_lowercase() == name_lower && Some(c.id) != exclude_id))
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        Ok(read_lock(&self.categories)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityStatus;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_get_all_sorted_by_name() {
        let (_temp_dir, repo) = create_test_repo();

        repo.upsert(Category::new("Utilities", "#0000FF", "bolt")).unwrap();
        repo.upsert(Category::new("dining", "#FF0000", "fork")).unwrap();
        repo.upsert(Category::new("Groceries", "#00FF00", "cart")).unwrap();

        let names: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["dining", "Groceries", "Utilities"]);
    }

    #[test]
    fn test_get_active_filters_inactive() {
        let (_temp_dir, repo) = create_test_repo();

        let mut retired = Category::new("Retired", "#123456", "");
        retired.status = ActivityStatus::Inactive;
        repo.upsert(retired).unwrap();
        repo.upsert(Category::new("Rent", "#654321", "home")).unwrap();

        let active = repo.get_active().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Rent");
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        let mut category = Category::new("Travel", "#ABCDEF", "plane");
        category.budget_limit = Some(crate::models::Money::from_cents(50000));
        let id = category.id;
        repo.upsert(category).unwrap();
        repo.save().unwrap();

        let reloaded = CategoryRepository::new(temp_dir.path().join("categories.json"));
        reloaded.load().unwrap();

        let category = reloaded.get(id).unwrap().unwrap();
        assert_eq!(category.name, "Travel");
        assert_eq!(category.budget_limit.map(|m| m.cents()), Some(50000));
    }

    #[test]
    fn test_name_exists() {
        let (_temp_dir, repo) = create_test_repo();

        let category = Category::new("Fuel", "#000000", "");
        let id = category.id;
        repo.upsert(category).unwrap();

        assert!(repo.name_exists(" fuel ", None).unwrap());
        assert!(!repo.name_exists("Fuel", Some(id)).unwrap());
        assert_eq!(repo.get_by_name("FUEL").unwrap().unwrap().id, id);
    }
}
