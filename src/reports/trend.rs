//! Monthly spending trend per category

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::ExpenseResult;
use crate::models::{AccountId, CategoryId, Money, Transaction};
use crate::storage::Storage;

use super::category_names;
use super::range::{DateRange, MonthKey};

/// Spending of one category in one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub month: MonthKey,
    pub category_id: CategoryId,
    pub total: Money,
    pub transaction_count: usize,
}

/// Bucket non-cancelled expenses in `range` by (month, category)
///
/// Points are ordered by month, then category.
pub fn monthly_trend(transactions: &[Transaction], range: &DateRange) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<(MonthKey, CategoryId), (Money, usize)> = BTreeMap::new();

    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && !t.is_cancelled() && range.contains(t.date))
    {
        let entry = buckets
            .entry((MonthKey::of(txn.date), txn.category_id))
            .or_insert((Money::zero(), 0));
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|((month, category_id), (total, transaction_count))| TrendPoint {
            month,
            category_id,
            total,
            transaction_count,
        })
        .collect()
}

/// Month-by-category spending table
#[derive(Debug, Clone)]
pub struct MonthlyTrendReport {
    pub range: DateRange,
    pub points: Vec<TrendPoint>,
    names: HashMap<CategoryId, String>,
}

impl MonthlyTrendReport {
    pub fn generate(
        storage: &Storage,
        range: DateRange,
        account_id: Option<AccountId>,
    ) -> ExpenseResult<Self> {
        let transactions = match account_id {
            Some(id) => storage
                .transactions
                .get_by_account_in_range(id, range.start(), range.end())?,
            None => storage
                .transactions
                .get_by_date_range(range.start(), range.end())?,
        };

        Ok(Self {
            points: monthly_trend(&transactions, &range),
            names: category_names(storage)?,
            range,
        })
    }

    pub fn category_name(&self, id: CategoryId) -> String {
        self.names.get(&id).cloned().unwrap_or_else(|| id.short())
    }

    /// Months that have at least one point, in order
    pub fn months(&self) -> Vec<MonthKey> {
        self.points
            .iter()
            .map(|p| p.month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Monthly Spending Trend: {}\n", self.range));
        output.push_str(&"=".repeat(56));
        output.push('\n');

        if self.points.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        for month in self.months() {
            let in_month: Vec<_> = self.points.iter().filter(|p| p.month == month).collect();
            let month_total: Money = in_month.iter().map(|p| p.total).sum();

            output.push_str(&format!("\n{}  (total {})\n", month, month_total));
            for point in in_month {
                output.push_str(&format!(
                    "  {:<30} {:>12} {:>6}\n",
                    self.category_name(point.category_id),
                    point.total,
                    point.transaction_count
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(category: CategoryId, on: NaiveDate, cents: i64) -> Transaction {
        Transaction::new(
            AccountId::new(),
            category,
            on,
            Money::from_cents(cents),
            false,
            Currency::Usd,
        )
    }

    #[test]
    fn test_trend_buckets_by_month_and_category() {
        let food = CategoryId::new();
        let fuel = CategoryId::new();
        let range = DateRange::new(date(2024, 12, 1), date(2025, 2, 28)).unwrap();

        let transactions = vec![
            expense(food, date(2025, 1, 3), 1000),
            expense(food, date(2025, 1, 20), 500),
            expense(fuel, date(2025, 1, 9), 4000),
            expense(food, date(2024, 12, 24), 2500),
            expense(food, date(2025, 3, 1), 9999),
        ];

        let points = monthly_trend(&transactions, &range);
        assert_eq!(points.len(), 3);

        assert_eq!(points[0].month.to_string(), "2024-12");
        assert_eq!(points[0].total.cents(), 2500);

        let jan_food = points
            .iter()
            .find(|p| p.month == MonthKey::of(date(2025, 1, 1)) && p.category_id == food)
            .unwrap();
        assert_eq!(jan_food.total.cents(), 1500);
        assert_eq!(jan_food.transaction_count, 2);
    }

    #[test]
    fn test_trend_ignores_income() {
        let salary = CategoryId::new();
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        let mut income = expense(salary, date(2025, 1, 1), 500000);
        income.is_income = true;

        assert!(monthly_trend(&[income], &range).is_empty());
    }
}
