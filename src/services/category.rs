//! Category service
//!
//! Categories are soft-deleted by deactivation. Hard deletion is refused
//! while any transaction or budget still points at the category.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryId, CategoryKind, Money};
use crate::storage::{default_categories, Storage};

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Field changes for [`CategoryService::update`]; `None` leaves a field alone
///
/// `budget_limit` and `kind` are doubly optional so they can be cleared with
/// `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub budget_limit: Option<Option<Money>>,
    pub kind: Option<Option<CategoryKind>>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.color.is_none()
            && self.icon.is_none()
            && self.budget_limit.is_none()
            && self.kind.is_none()
    }
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new active category
    pub fn create(
        &self,
        name: &str,
        color: &str,
        icon: &str,
        budget_limit: Option<Money>,
        kind: Option<CategoryKind>,
    ) -> ExpenseResult<Category> {
        let name = name.trim();

        let mut category = Category::new(name, color.trim(), icon.trim());
        category.budget_limit = budget_limit;
        category.kind = kind;
        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if self.storage.categories.name_exists(name, None)? {
            return Err(ExpenseError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id,
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> ExpenseResult<Category> {
        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(None)
    }

    /// Active categories only
    pub fn list_active(&self) -> ExpenseResult<Vec<Category>> {
        self.storage.categories.get_active()
    }

    pub fn list_all(&self) -> ExpenseResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Apply a partial update
    pub fn update(&self, id: CategoryId, changes: CategoryUpdate) -> ExpenseResult<Category> {
        let mut category = self.get(id)?;
        let before = category.clone();

        if changes.is_empty() {
            return Ok(category);
        }

        if let Some(name) = changes.name {
            let name = name.trim();
            if self.storage.categories.name_exists(name, Some(id))? {
                return Err(ExpenseError::Duplicate {
                    entity_type: "Category",
                    identifier: name.to_string(),
                });
            }
            category.name = name.to_string();
        }
        if let Some(color) = changes.color {
            category.color = color.trim().to_string();
        }
        if let Some(icon) = changes.icon {
            category.icon = icon.trim().to_string();
        }
        if let Some(limit) = changes.budget_limit {
            category.budget_limit = limit;
        }
        if let Some(kind) = changes.kind {
            category.kind = kind;
        }

        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;
        category.updated_at = chrono::Utc::now();

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id,
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    pub fn deactivate(&self, id: CategoryId) -> ExpenseResult<Category> {
        self.set_active(id, false)
    }

    pub fn reactivate(&self, id: CategoryId) -> ExpenseResult<Category> {
        self.set_active(id, true)
    }

    fn set_active(&self, id: CategoryId, active: bool) -> ExpenseResult<Category> {
        let mut category = self.get(id)?;
        let before = category.clone();

        let next = if active {
            category.status.activate()
        } else {
            category.status.deactivate()
        };
        category.status = next.map_err(|e| ExpenseError::invalid_transition("Category", e))?;
        category.updated_at = chrono::Utc::now();

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id,
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    /// Delete a category that nothing references
    pub fn delete(&self, id: CategoryId) -> ExpenseResult<Category> {
        let category = self.get(id)?;

        let references = self.storage.transactions.count_by_category(id)?
            + self.storage.budgets.count_by_category(id)?;
        if references > 0 {
            return Err(ExpenseError::InUse {
                entity_type: "Category",
                identifier: category.name,
                references,
            });
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id,
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    /// Create the starter categories if there are none yet; returns how many were added
    pub fn seed_defaults(&self) -> ExpenseResult<usize> {
        if self.storage.categories.count()? > 0 {
            return Ok(0);
        }

        let defaults = default_categories();
        for category in &defaults {
            self.storage.categories.upsert(category.clone())?;
        }
        self.storage.categories.save()?;

        let entries: Vec<_> = defaults
            .iter()
            .map(|c| {
                AuditEntry::create(EntityType::Category, c.id.to_string(), Some(c.name.clone()), c)
            })
            .collect();
        self.storage.log_batch(&entries)?;

        tracing::info!(count = defaults.len(), "seeded default categories");
        Ok(defaults.len())
    }
}
