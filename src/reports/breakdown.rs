//! Spending by category
//!
//! Groups expense transactions inside a date range by category and ranks
//! the categories by total spent.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{AccountId, CategoryId, Money, Transaction};
use crate::storage::Storage;

use super::category_names;
use super::range::DateRange;

/// Total spent in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category_id: CategoryId,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of all spending in the range, 0-100
    pub percentage: f64,
}

/// Aggregate non-cancelled expenses in `range` by category, largest first
///
/// The totals always add up to the sum of the expenses in range.
pub fn category_breakdown(transactions: &[Transaction], range: &DateRange) -> Vec<CategoryTotal> {
    let mut by_category: HashMap<CategoryId, (Money, usize)> = HashMap::new();

    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && !t.is_cancelled() && range.contains(t.date))
    {
        let entry = by_category
            .entry(txn.category_id)
            .or_insert((Money::zero(), 0));
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    let grand_total: Money = by_category.values().map(|(total, _)| *total).sum();

    let mut rows: Vec<_> = by_category
        .into_iter()
        .map(|(category_id, (total, transaction_count))| CategoryTotal {
            category_id,
            total,
            transaction_count,
            percentage: total.percent_of(grand_total),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then(a.category_id.cmp(&b.category_id))
    });
    rows
}

/// A breakdown row with its category name resolved
#[derive(Debug, Clone)]
pub struct BreakdownRow {
    pub category_name: String,
    pub totals: CategoryTotal,
}

/// Category breakdown over a range, optionally for one account
#[derive(Debug, Clone)]
pub struct CategoryBreakdownReport {
    pub range: DateRange,
    pub rows: Vec<BreakdownRow>,
    pub total_spending: Money,
}

impl CategoryBreakdownReport {
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
        let names = category_names(storage)?;

        let totals = category_breakdown(&transactions, &range);
        let total_spending = totals.iter().map(|t| t.total).sum();
        let rows = totals
            .into_iter()
            .map(|totals| BreakdownRow {
                category_name: names
                    .get(&totals.category_id)
                    .cloned()
                    .unwrap_or_else(|| totals.category_id.short()),
                totals,
            })
            .collect();

        Ok(Self {
            range,
            rows,
            total_spending,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending by Category: {}\n", self.range));
        output.push_str(&"=".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>12} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No expenses in this period.\n");
        }

        for row in &self.rows {
            output.push_str(&format!(
                "{:<30} {:>12} {:>8} {:>7.1}%\n",
                row.category_name,
                row.totals.total,
                row.totals.transaction_count,
                row.totals.percentage
            ));
        }

        output.push_str(&"-".repeat(64));
        output.push('\n');
        output.push_str(&format!("{:<30} {:>12}\n", "TOTAL", self.total_spending));

        output
    }

    /// Write the report rows as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Start Date", "End Date", "Category", "Amount", "Count", "Percentage"])
            .map_err(|e| ExpenseError::Export(e.to_string()))?;

        for row in &self.rows {
            csv_writer
                .write_record([
                    self.range.start().to_string(),
                    self.range.end().to_string(),
                    row.category_name.clone(),
                    row.totals.total.to_string(),
                    row.totals.transaction_count.to_string(),
                    format!("{:.2}", row.totals.percentage),
                ])
                .map_err(|e| ExpenseError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, TransactionStatus};
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn txn(category: CategoryId, on: NaiveDate, cents: i64, income: bool) -> Transaction {
        Transaction::new(
            AccountId::new(),
            category,
            on,
            Money::from_cents(cents),
            income,
            Currency::Usd,
        )
    }

    #[test]
    fn test_breakdown_groups_and_sorts() {
        let food = CategoryId::new();
        let rent = CategoryId::new();
        let range = DateRange::new(date(1, 1), date(1, 31)).unwrap();

        let transactions = vec![
            txn(food, date(1, 3), 2000, false),
            txn(food, date(1, 9), 1000, false),
            txn(rent, date(1, 1), 7000, false),
        ];

        let rows = category_breakdown(&transactions, &range);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category_id, rent);
        assert_eq!(rows[0].total.cents(), 7000);
        assert_eq!(rows[1].transaction_count, 2);
        assert!((rows[0].percentage - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_excludes_income_cancelled_and_out_of_range() {
        let food = CategoryId::new();
        let range = DateRange::new(date(1, 1), date(1, 31)).unwrap();

        let mut cancelled = txn(food, date(1, 10), 500, false);
        cancelled.status = TransactionStatus::Cancelled;
        let transactions = vec![
            txn(food, date(1, 5), 1000, false),
            txn(food, date(1, 5), 9000, true),
            txn(food, date(2, 1), 3000, false),
            cancelled,
        ];

        let rows = category_breakdown(&transactions, &range);
        let total: Money = rows.iter().map(|r| r.total).sum();
        assert_eq!(total.cents(), 1000);
    }

    #[test]
    fn test_breakdown_empty() {
        let range = DateRange::new(date(1, 1), date(1, 31)).unwrap();
        assert!(category_breakdown(&[], &range).is_empty());
    }

    #[test]
    fn test_export_csv() {
        let report = CategoryBreakdownReport {
            range: DateRange::new(date(1, 1), date(1, 31)).unwrap(),
            rows: vec![BreakdownRow {
                category_name: "Food, Drink".into(),
                totals: CategoryTotal {
                    category_id: CategoryId::new(),
                    total: Money::from_cents(1250),
                    transaction_count: 2,
                    percentage: 100.0,
                },
            }],
            total_spending: Money::from_cents(1250),
        };

        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Start Date,End Date,Category"));
        assert!(text.contains("\"Food, Drink\",12.50,2,100.00"));
    }
}
