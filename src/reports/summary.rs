//! Income and expense totals, and month-over-month change

use chrono::NaiveDate;

use crate::error::ExpenseResult;
use crate::models::{AccountId, Money, Transaction};
use crate::storage::Storage;

use super::range::{DateRange, MonthKey};

/// Totals over a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_income: Money,
    pub total_expenses: Money,
    /// income minus expenses
    pub net: Money,
    pub transaction_count: usize,
}

/// Sum non-cancelled transactions in `range`
pub fn summarize(transactions: &[Transaction], range: &DateRange) -> Summary {
    let mut summary = Summary::default();

    for txn in transactions
        .iter()
        .filter(|t| !t.is_cancelled() && range.contains(t.date))
    {
        if txn.is_income {
            summary.total_income += txn.amount;
        } else {
            summary.total_expenses += txn.amount;
        }
        summary.transaction_count += 1;
    }

    summary.net = summary.total_income - summary.total_expenses;
    summary
}

/// Relative change from `previous` to `current`, in percent
///
/// Measured against the magnitude of `previous`, so an improvement from a
/// negative value is reported as positive. Zero when `previous` is zero.
pub fn percent_change(previous: Money, current: Money) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    (current - previous).cents() as f64 / previous.abs().cents() as f64 * 100.0
}

/// Net result of one month compared with the month before
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyChange {
    pub month: MonthKey,
    pub current_net: Money,
    pub previous_net: Money,
    pub percent: f64,
}

fn month_net(storage: &Storage, account_id: AccountId, month: MonthKey) -> ExpenseResult<Money> {
    let transactions = storage
        .transactions
        .get_by_account_in_month(account_id, month.year, month.month)?;

    Ok(transactions
        .iter()
        .filter(|t| !t.is_cancelled())
        .map(|t| t.signed_amount())
        .sum())
}

/// Compare the net of the month containing `today` with the previous month
///
/// Net is income minus expenses, not the sum of unsigned amounts.
pub fn monthly_change(
    storage: &Storage,
    account_id: AccountId,
    today: NaiveDate,
) -> ExpenseResult<MonthlyChange> {
    let month = MonthKey::of(today);
    let current_net = month_net(storage, account_id, month)?;
    let previous_net = month_net(storage, account_id, month.previous())?;

    Ok(MonthlyChange {
        month,
        current_net,
        previous_net,
        percent: percent_change(previous_net, current_net),
    })
}

/// Income and expense summary report
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub range: DateRange,
    pub summary: Summary,
    pub change: Option<MonthlyChange>,
}

impl SummaryReport {
    /// Summarize `range`; with an account, also compare this month to the last
    pub fn generate(
        storage: &Storage,
        range: DateRange,
        account_id: Option<AccountId>,
        today: NaiveDate,
    ) -> ExpenseResult<Self> {
        let (transactions, change) = match account_id {
            Some(id) => (
                storage
                    .transactions
                    .get_by_account_in_range(id, range.start(), range.end())?,
                Some(monthly_change(storage, id, today)?),
            ),
            None => (
                storage
                    .transactions
                    .get_by_date_range(range.start(), range.end())?,
                None,
            ),
        };

        Ok(Self {
            summary: summarize(&transactions, &range),
            range,
            change,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Summary: {}\n", self.range));
        output.push_str(&"=".repeat(48));
        output.push('\n');
        output.push_str(&format!("{:<30} {:>12}\n", "Income", self.summary.total_income));
        output.push_str(&format!(
            "{:<30} {:>12}\n",
            "Expenses", self.summary.total_expenses
        ));
        output.push_str(&"-".repeat(48));
        output.push('\n');
        output.push_str(&format!("{:<30} {:>12}\n", "Net", self.summary.net));
        output.push_str(&format!(
            "{:<30} {:>12}\n",
            "Transactions", self.summary.transaction_count
        ));

        if let Some(change) = &self.change {
            output.push('\n');
            output.push_str(&format!(
                "{:<30} {:>12}\n",
                format!("Net {}", change.month),
                change.current_net
            ));
            output.push_str(&format!(
                "{:<30} {:>12}\n",
                format!("Net {}", change.month.previous()),
                change.previous_net
            ));
            output.push_str(&format!("{:<30} {:>+11.1}%\n", "Change", change.percent));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AppPaths;
    use crate::models::{AccountType, CategoryId, Currency, TransactionStatus};
    use crate::services::{
        AccountService, CategoryService, CreateTransactionInput, TransactionService,
    };
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(on: NaiveDate, cents: i64, income: bool) -> Transaction {
        Transaction::new(
            AccountId::new(),
            CategoryId::new(),
            on,
            Money::from_cents(cents),
            income,
            Currency::Usd,
        )
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_summarize() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        let mut cancelled = txn(date(2025, 1, 4), 100000, false);
        cancelled.status = TransactionStatus::Cancelled;

        let summary = summarize(
            &[
                txn(date(2025, 1, 1), 300000, true),
                txn(date(2025, 1, 2), 12000, false),
                txn(date(2025, 1, 3), 8000, false),
                txn(date(2025, 2, 1), 5000, false),
                cancelled,
            ],
            &range,
        );

        assert_eq!(summary.total_income.cents(), 300000);
        assert_eq!(summary.total_expenses.cents(), 20000);
        assert_eq!(summary.net.cents(), 280000);
        assert_eq!(summary.transaction_count, 3);
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(
            percent_change(Money::from_cents(10000), Money::from_cents(15000)),
            50.0
        );
        assert_eq!(
            percent_change(Money::from_cents(10000), Money::from_cents(5000)),
            -50.0
        );
        assert_eq!(percent_change(Money::zero(), Money::from_cents(5000)), 0.0);
        // from -100 to -50 is an improvement
        assert_eq!(
            percent_change(Money::from_cents(-10000), Money::from_cents(-5000)),
            50.0
        );
    }

    #[test]
    fn test_monthly_change() {
        let (_temp_dir, storage) = create_test_storage();
        let account = AccountService::new(&storage)
            .create("Checking", AccountType::Checking, Currency::Usd, Money::zero())
            .unwrap();
        let category = CategoryService::new(&storage)
            .create("Food", "#00AA00", "", None, None)
            .unwrap();

        let txns = TransactionService::new(&storage);
        for (on, cents, income) in [
            (date(2025, 1, 10), 20000, true),
            (date(2025, 2, 10), 40000, true),
            (date(2025, 2, 12), 10000, false),
        ] {
            txns.create(CreateTransactionInput::new(
                account.id,
                category.id,
                on,
                Money::from_cents(cents),
                income,
            ))
            .unwrap();
        }

        let change = monthly_change(&storage, account.id, date(2025, 2, 20)).unwrap();
        assert_eq!(change.previous_net.cents(), 20000);
        assert_eq!(change.current_net.cents(), 30000);
        assert!((change.percent - 50.0).abs() < 1e-9);
    }
}
