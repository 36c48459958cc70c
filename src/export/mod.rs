//! Data export
//!
//! - CSV: transactions and account balances, spreadsheet-compatible
//! - JSON: versioned full export, machine-readable
//! - YAML: the same full export, human-readable

use std::io::Write;
use std::str::FromStr;

use crate::error::ExpenseResult;
use crate::storage::Storage;

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_accounts_csv, export_transactions_csv};
pub use json::{export_full_json, read_json_export, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, read_yaml_export};

/// Output format of `export`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    /// Transactions only
    Csv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            other => Err(format!("Unknown format '{}'. Valid: json, yaml, csv", other)),
        }
    }
}

/// Write the store to `writer` in `format`
pub fn export<W: Write>(storage: &Storage, format: ExportFormat, writer: &mut W) -> ExpenseResult<()> {
    match format {
        ExportFormat::Json => export_full_json(storage, writer, true),
        ExportFormat::Yaml => export_full_yaml(storage, writer),
        ExportFormat::Csv => export_transactions_csv(storage, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
