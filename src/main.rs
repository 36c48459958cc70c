use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{
    handle_account_command, handle_audit_command, handle_budget_command, handle_category_command,
    handle_export_command, handle_report_command, handle_transaction_command,
};
use expense_tracker::config::{paths::AppPaths, settings::Settings};
use expense_tracker::services::CategoryService;
use expense_tracker::storage::{initialize_storage, Storage};

/// Environment variable holding the diagnostic log filter
const LOG_ENV: &str = "EXPENSE_LOG";

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal finance tracker",
    long_about = "Track accounts, income and expenses by category, set budgets and \
                  look at where the money went, all from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, default settings and starter categories
    Init,

    /// Show or change settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(expense_tracker::cli::AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(expense_tracker::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(expense_tracker::cli::TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(expense_tracker::cli::BudgetCommands),

    /// Spending analytics
    #[command(subcommand)]
    Report(expense_tracker::cli::ReportCommands),

    /// Export all data
    Export(expense_tracker::cli::ExportArgs),

    /// Show recent changes from the audit log
    Audit(expense_tracker::cli::AuditArgs),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show paths and current settings
    Show,
    /// Change a setting: currency, dark-mode, biometric-auth, date-format
    Set { key: String, value: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = AppPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing expense tracker at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;

            settings.onboarding_completed = true;
            settings.save(&paths)?;

            let seeded = CategoryService::new(&storage).seed_defaults()?;
            println!("Initialization complete!");
            if seeded > 0 {
                println!("Created {} default categories.", seeded);
                println!("Run 'expense category list' to see them.");
            }
        }
        Some(Commands::Config(ConfigCommands::Show)) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  currency:       {}", settings.currency);
            println!("  dark-mode:      {}", settings.dark_mode);
            println!("  biometric-auth: {}", settings.biometric_auth);
            println!("  date-format:    {}", settings.date_format);
        }
        Some(Commands::Config(ConfigCommands::Set { key, value })) => {
            settings.set(&key, &value)?;
            settings.save(&paths)?;
            println!("Set {} = {}", key, value);
        }
        Some(Commands::Account(cmd)) => handle_account_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, cmd)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Audit(args)) => handle_audit_command(&storage, args)?,
        None => {
            println!("expense - personal finance tracker");
            println!();
            if !storage.is_initialized() {
                println!("Run 'expense init' to get started.");
            }
            println!("Run 'expense --help' for usage information.");
        }
    }

    Ok(())
}
