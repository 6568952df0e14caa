//! CLI commands for backup export and import
//!
//! JSON exports the whole ledger and can be imported back; CSV exports
//! transactions only.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_json, export_transactions_csv, import_document};
use crate::services::ImportService;
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export wallets, categories and transactions as JSON
    Json {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
    },
    /// Export transactions as CSV
    Csv {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
    },
}

fn create_output(path: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn flush<W: Write>(mut writer: W) -> LedgerResult<()> {
    writer
        .flush()
        .map_err(|e| LedgerError::Export(format!("Failed to write export: {}", e)))
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> LedgerResult<()> {
    let data = storage.data();

    match cmd {
        ExportCommands::Json { output: Some(path) } => {
            let mut writer = create_output(&path)?;
            export_json(data, &mut writer)?;
            flush(writer)?;
            eprintln!(
                "Exported {} wallets, {} categories, {} transactions to: {}",
                data.wallets.len(),
                data.categories.len(),
                data.transactions.len(),
                path.display()
            );
        }
        ExportCommands::Json { output: None } => {
            let mut stdout = io::stdout().lock();
            export_json(data, &mut stdout)?;
            flush(stdout)?;
        }
        ExportCommands::Csv { output: Some(path) } => {
            let mut writer = create_output(&path)?;
            export_transactions_csv(data, &mut writer)?;
            flush(writer)?;
            eprintln!(
                "Exported {} transactions to: {}",
                data.transactions.len(),
                path.display()
            );
        }
        ExportCommands::Csv { output: None } => {
            export_transactions_csv(data, io::stdout().lock())?;
        }
    }

    Ok(())
}

/// Handle the import command
///
/// Importing replaces the whole ledger, so a non-empty ledger needs `yes`.
pub fn handle_import_command(storage: &mut Storage, file: &Path, yes: bool) -> LedgerResult<()> {
    let content = std::fs::read_to_string(file).map_err(|e| {
        LedgerError::Import(format!("Failed to read {}: {}", file.display(), e))
    })?;
    let document = import_document(&content)?;

    let data = storage.data();
    let occupied =
        !data.wallets.is_empty() || !data.categories.is_empty() || !data.transactions.is_empty();
    if occupied && !yes {
        println!("Import replaces all existing wallets, categories and transactions.");
        println!("Run again with --yes to continue.");
        return Ok(());
    }

    let summary = ImportService::new(storage).import(document)?;

    println!("Imported from: {}", file.display());
    println!("  Wallets:      {}", summary.wallets);
    println!("  Categories:   {}", summary.categories);
    println!("  Transactions: {}", summary.transactions);
    if summary.reconciled > 0 {
        println!(
            "  Added {} opening/adjustment transactions so balances match",
            summary.reconciled
        );
    }

    Ok(())
}
