//! Report CLI commands

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};

use super::{parse_date, resolve_account};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::AccountId;
use crate::reports::{
    monthly_change, CategoryBreakdownReport, DateRange, MonthlyTrendReport, Period, SummaryReport,
};
use crate::services::AccountService;
use crate::storage::Storage;

/// Date window and account scope shared by the reports
#[derive(Args, Debug)]
pub struct ReportWindow {
    /// Rolling window ending today: week, month or year
    #[arg(short, long, default_value = "month", conflicts_with_all = ["start", "end"])]
    period: Period,
    /// Start date (YYYY-MM-DD); requires --end
    #[arg(short, long, requires = "end")]
    start: Option<String>,
    /// End date (YYYY-MM-DD); requires --start
    #[arg(short, long, requires = "start")]
    end: Option<String>,
    /// Limit to one account (name or ID)
    #[arg(short, long)]
    account: Option<String>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending by category
    Breakdown {
        #[command(flatten)]
        window: ReportWindow,
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Monthly spending per category
    Trend {
        #[command(flatten)]
        window: ReportWindow,
    },

    /// Income, expenses and net
    Summary {
        #[command(flatten)]
        window: ReportWindow,
    },

    /// This month's net against last month's for one account
    Change {
        /// Account name or ID
        account: String,
    },
}

impl ReportWindow {
    fn resolve(
        &self,
        storage: &Storage,
        today: NaiveDate,
    ) -> ExpenseResult<(DateRange, Option<AccountId>)> {
        let range = match (&self.start, &self.end) {
            (Some(start), Some(end)) => {
                DateRange::new(parse_date(Some(start))?, parse_date(Some(end))?)?
            }
            _ => DateRange::last(self.period, today),
        };

        let account_id = match &self.account {
            Some(account) => Some(resolve_account(&AccountService::new(storage), account)?.id),
            None => None,
        };

        Ok((range, account_id))
    }
}

/// Handle report commands
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> ExpenseResult<()> {
    let today = Local::now().date_naive();

    match cmd {
        ReportCommands::Breakdown { window, output } => {
            let (range, account_id) = window.resolve(storage, today)?;
            let report = CategoryBreakdownReport::generate(storage, range, account_id)?;

            if let Some(path) = output {
                let file = File::create(&path).map_err(|e| {
                    ExpenseError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                report.export_csv(BufWriter::new(file))?;
                println!("Breakdown exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal());
            }
        }

        ReportCommands::Trend { window } => {
            let (range, account_id) = window.resolve(storage, today)?;
            let report = MonthlyTrendReport::generate(storage, range, account_id)?;
            print!("{}", report.format_terminal());
        }

        ReportCommands::Summary { window } => {
            let (range, account_id) = window.resolve(storage, today)?;
            let report = SummaryReport::generate(storage, range, account_id, today)?;
            print!("{}", report.format_terminal());
        }

        ReportCommands::Change { account } => {
            let account = resolve_account(&AccountService::new(storage), &account)?;
            let change = monthly_change(storage, account.id, today)?;

            println!("{}", account.name);
            println!("  {}: {:>12}", change.month, change.current_net);
            println!("  {}: {:>12}", change.month.previous(), change.previous_net);
            println!("  Change:  {:>+11.1}%", change.percent);
        }
    }

    Ok(())
}
