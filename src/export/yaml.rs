//! YAML export, the same document as JSON in a human-readable form

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

fn export_err(e: impl std::fmt::Display) -> ExpenseError {
    ExpenseError::Export(e.to_string())
}

/// Export the full database to YAML, preceded by a comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> ExpenseResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# Expense Tracker Full Export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)
}

/// Parse and validate a YAML export; comment lines are ignored by the parser
pub fn read_yaml_export(yaml_str: &str) -> ExpenseResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| ExpenseError::Validation(e.to_string()))?;
    export.validate().map_err(ExpenseError::Validation)?;
    Ok(export)
}
