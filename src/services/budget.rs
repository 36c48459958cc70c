//! Budget service
//!
//! Budgets are spending caps over a date window, optionally scoped to one
//! category. The amount spent is never stored; [`BudgetService::progress`]
//! computes it from the live transactions on every call.

use chrono::{Local, NaiveDate};

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::budget::BudgetValidationError;
use crate::models::{Budget, BudgetId, CategoryId, Money};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Field changes for [`BudgetService::update`]; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub name: Option<String>,
    pub amount_limit: Option<Money>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notify_at_percent: Option<i64>,
    /// `Some(None)` removes the category scope
    pub category_id: Option<Option<CategoryId>>,
}

/// Spending against a budget over its window
#[derive(Debug, Clone)]
pub struct BudgetProgress {
    pub budget: Budget,
    pub spent: Money,
    /// Negative once the budget is overspent
    pub remaining: Money,
    pub percent_used: f64,
    pub threshold_reached: bool,
    pub transaction_count: usize,
}

impl BudgetProgress {
    pub fn is_over(&self) -> bool {
        self.remaining.is_negative()
    }
}

fn validation_error(err: BudgetValidationError) -> ExpenseError {
    match err {
        BudgetValidationError::EmptyName => ExpenseError::Validation(err.to_string()),
        BudgetValidationError::NonPositiveLimit(_)
        | BudgetValidationError::NotifyPercentOutOfRange(_) => {
            ExpenseError::InvalidAmount(err.to_string())
        }
        BudgetValidationError::InvalidDateRange { start, end } => {
            ExpenseError::InvalidDateRange { start, end }
        }
    }
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a budget after validating every field and the category reference
    pub fn create(
        &self,
        name: &str,
        amount_limit: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
        notify_at_percent: i64,
        category_id: Option<CategoryId>,
    ) -> ExpenseResult<Budget> {
        let budget = Budget::new(
            name.trim(),
            amount_limit,
            start_date,
            end_date,
            notify_at_percent,
            category_id,
        );
        budget.validate().map_err(validation_error)?;
        self.check_category(category_id)?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::Budget,
            budget.id,
            Some(budget.name.clone()),
            &budget,
        )?;

        tracing::info!(budget = %budget.id, name = %budget.name, "budget created");
        Ok(budget)
    }

    pub fn get(&self, id: BudgetId) -> ExpenseResult<Budget> {
        self.storage
            .budgets
            .get(id)?
            .ok_or_else(|| ExpenseError::budget_not_found(id.to_string()))
    }

    /// Find a budget by name (case-insensitive), full ID or short ID
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Budget>> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<BudgetId>() {
            return self.storage.budgets.get(id);
        }

        let needle = identifier.to_lowercase();
        Ok(self
            .storage
            .budgets
            .get_all()?
            .into_iter()
            .find(|b| b.name.to_lowercase() == needle || b.id.short() == identifier))
    }

    /// All budgets ordered by start date
    pub fn list(&self) -> ExpenseResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Budgets whose window contains `date`
    pub fn list_active_on(&self, date: NaiveDate) -> ExpenseResult<Vec<Budget>> {
        self.storage.budgets.get_active_on(date)
    }

    /// Budgets whose window contains today's date
    pub fn list_active(&self) -> ExpenseResult<Vec<Budget>> {
        self.list_active_on(Local::now().date_naive())
    }

    pub fn list_for_category(&self, category_id: CategoryId) -> ExpenseResult<Vec<Budget>> {
        self.storage.budgets.get_by_category(category_id)
    }

    /// Apply a partial update; the merged budget is validated like a new one
    pub fn update(&self, id: BudgetId, changes: BudgetUpdate) -> ExpenseResult<Budget> {
        let mut budget = self.get(id)?;
        let before = budget.clone();

        if let Some(name) = changes.name {
            budget.name = name.trim().to_string();
        }
        if let Some(limit) = changes.amount_limit {
            budget.amount_limit = limit;
        }
        if let Some(start) = changes.start_date {
            budget.start_date = start;
        }
        if let Some(end) = changes.end_date {
            budget.end_date = end;
        }
        if let Some(pct) = changes.notify_at_percent {
            budget.notify_at_percent = pct;
        }
        if let Some(category_id) = changes.category_id {
            budget.category_id = category_id;
        }

        budget.validate().map_err(validation_error)?;
        self.check_category(budget.category_id)?;
        budget.updated_at = chrono::Utc::now();

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_update(
            EntityType::Budget,
            budget.id,
            Some(budget.name.clone()),
            &before,
            &budget,
        )?;

        Ok(budget)
    }

    pub fn delete(&self, id: BudgetId) -> ExpenseResult<Budget> {
        let budget = self.get(id)?;

        self.storage.budgets.delete(id)?;
        self.storage.budgets.save()?;

        self.storage.log_delete(
            EntityType::Budget,
            budget.id,
            Some(budget.name.clone()),
            &budget,
        )?;

        Ok(budget)
    }

    /// Spending so far: non-cancelled expenses inside the window, limited
    /// to the budget's category when it has one
    pub fn progress(&self, id: BudgetId) -> ExpenseResult<BudgetProgress> {
        let budget = self.get(id)?;

        let candidates = match budget.category_id {
            Some(category_id) => self.storage.transactions.get_by_category(category_id)?,
            None => self
                .storage
                .transactions
                .get_by_date_range(budget.start_date, budget.end_date)?,
        };

        let counted: Vec<_> = candidates
            .iter()
            .filter(|t| t.is_expense() && !t.is_cancelled() && budget.is_active_on(t.date))
            .collect();
        let spent: Money = counted.iter().map(|t| t.amount).sum();

        Ok(BudgetProgress {
            remaining: budget.amount_limit - spent,
            percent_used: spent.percent_of(budget.amount_limit),
            threshold_reached: budget.threshold_reached(spent),
            transaction_count: counted.len(),
            spent,
            budget,
        })
    }

    fn check_category(&self, category_id: Option<CategoryId>) -> ExpenseResult<()> {
        if let Some(category_id) = category_id {
            self.storage
                .categories
                .get(category_id)?
                .ok_or_else(|| ExpenseError::category_not_found(category_id.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AppPaths;
    use crate::models::{AccountId, Category, Currency, Transaction, TransactionStatus};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add_category(storage: &Storage, name: &str) -> CategoryId {
        let category = Category::new(name, "#123456", "");
        let id = category.id;
        storage.categories.upsert(category).unwrap();
        id
    }

    fn add_txn(storage: &Storage, category: CategoryId, on: NaiveDate, cents: i64, income: bool) -> Transaction {
        let txn = Transaction::new(
            AccountId::new(),
            category,
            on,
            Money::from_cents(cents),
            income,
            Currency::Usd,
        );
        storage.transactions.upsert(txn.clone()).unwrap();
        txn
    }

    #[test]
    fn test_create_valid_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service
            .create(
                "January",
                Money::from_cents(50000),
                date(2025, 1, 1),
                date(2025, 1, 31),
                80,
                None,
            )
            .unwrap();

        assert_eq!(service.get(budget.id).unwrap().name, "January");
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_create_error_mapping() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let (start, end) = (date(2025, 1, 1), date(2025, 1, 31));
        let limit = Money::from_cents(1000);

        assert!(matches!(
            service.create(" ", limit, start, end, 80, None),
            Err(ExpenseError::Validation(_))
        ));
        assert!(matches!(
            service.create("B", Money::zero(), start, end, 80, None),
            Err(ExpenseError::InvalidAmount(_))
        ));
        assert!(matches!(
            service.create("B", limit, end, start, 80, None),
            Err(ExpenseError::InvalidDateRange { .. })
        ));
        assert!(matches!(
            service.create("B", limit, start, start, 80, None),
            Err(ExpenseError::InvalidDateRange { .. })
        ));
        assert!(matches!(
            service.create("B", limit, start, end, 101, None),
            Err(ExpenseError::InvalidAmount(_))
        ));
        assert!(service
            .create("B", limit, start, end, 80, Some(CategoryId::new()))
            .unwrap_err()
            .is_not_found());

        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_active_window_is_inclusive() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service
            .create(
                "Jan",
                Money::from_cents(1000),
                date(2025, 1, 1),
                date(2025, 1, 31),
                80,
                None,
            )
            .unwrap();

        assert_eq!(service.list_active_on(date(2025, 1, 1)).unwrap().len(), 1);
        assert_eq!(service.list_active_on(date(2025, 1, 15)).unwrap().len(), 1);
        assert_eq!(service.list_active_on(date(2025, 1, 31)).unwrap().len(), 1);
        assert!(service.list_active_on(date(2025, 2, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_update_revalidates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let food = add_category(&storage, "Food");

        let budget = service
            .create(
                "Jan",
                Money::from_cents(1000),
                date(2025, 1, 1),
                date(2025, 1, 31),
                80,
                None,
            )
            .unwrap();

        let updated = service
            .update(
                budget.id,
                BudgetUpdate {
                    amount_limit: Some(Money::from_cents(2000)),
                    category_id: Some(Some(food)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount_limit.cents(), 2000);
        assert_eq!(service.list_for_category(food).unwrap().len(), 1);

        let bad = service.update(
            budget.id,
            BudgetUpdate {
                end_date: Some(date(2024, 12, 1)),
                ..Default::default()
            },
        );
        assert!(matches!(bad, Err(ExpenseError::InvalidDateRange { .. })));
        assert_eq!(service.get(budget.id).unwrap().end_date, date(2025, 1, 31));
    }

    #[test]
    fn test_progress_counts_window_and_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let food = add_category(&storage, "Food");
        let fun = add_category(&storage, "Fun");

        add_txn(&storage, food, date(2025, 1, 1), 2000, false);
        add_txn(&storage, food, date(2025, 1, 31), 3000, false);
        add_txn(&storage, food, date(2025, 2, 1), 9999, false);
        add_txn(&storage, food, date(2025, 1, 10), 5000, true);
        add_txn(&storage, fun, date(2025, 1, 10), 7000, false);
        let mut cancelled = add_txn(&storage, food, date(2025, 1, 12), 4000, false);
        cancelled.status = TransactionStatus::Cancelled;
        storage.transactions.upsert(cancelled).unwrap();

        let budget = service
            .create(
                "Food Jan",
                Money::from_cents(6000),
                date(2025, 1, 1),
                date(2025, 1, 31),
                80,
                Some(food),
            )
            .unwrap();

        let progress = service.progress(budget.id).unwrap();
        assert_eq!(progress.spent.cents(), 5000);
        assert_eq!(progress.remaining.cents(), 1000);
        assert_eq!(progress.transaction_count, 2);
        assert!(progress.threshold_reached);
        assert!(!progress.is_over());

        let overall = service
            .create(
                "All Jan",
                Money::from_cents(10000),
                date(2025, 1, 1),
                date(2025, 1, 31),
                90,
                None,
            )
            .unwrap();
        let progress = service.progress(overall.id).unwrap();
        assert_eq!(progress.spent.cents(), 12000);
        assert!(progress.is_over());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service
            .create(
                "Temp",
                Money::from_cents(1000),
                date(2025, 1, 1),
                date(2025, 1, 2),
                0,
                None,
            )
            .unwrap();

        service.delete(budget.id).unwrap();
        assert!(service.get(budget.id).unwrap_err().is_not_found());
        assert!(service.delete(budget.id).unwrap_err().is_not_found());
    }
}
