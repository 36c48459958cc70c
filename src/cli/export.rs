//! Export CLI command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export, export_accounts_csv, ExportFormat};
use crate::storage::Storage;

/// Arguments of `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// json, yaml or csv
    pub format: ExportFormat,

    /// Output file path; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// With csv, export account balances instead of transactions
    #[arg(long)]
    pub accounts: bool,
}

fn write_export<W: Write>(
    storage: &Storage,
    args: &ExportArgs,
    writer: &mut W,
) -> ExpenseResult<()> {
    if args.accounts {
        if args.format != ExportFormat::Csv {
            return Err(ExpenseError::Validation(
                "--accounts is only available with csv".into(),
            ));
        }
        export_accounts_csv(storage, &mut *writer)?;
    } else {
        export(storage, args.format, writer)?;
    }
    writer.flush().map_err(|e| ExpenseError::Export(e.to_string()))
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> ExpenseResult<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                ExpenseError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(storage, &args, &mut writer)?;

            eprintln!("Exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, &args, &mut writer)?;
        }
    }

    Ok(())
}
