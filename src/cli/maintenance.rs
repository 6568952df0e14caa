//! Reset, integrity check and audit history commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::services::MaintenanceService;
use crate::storage::Storage;

/// Reset subcommands
#[derive(Subcommand)]
pub enum ResetCommands {
    /// Delete every transaction and zero all balances
    Transactions {
        /// Skip the confirmation notice
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete all wallets, categories and transactions
    All {
        /// Skip the confirmation notice
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle a reset command
pub fn handle_reset_command(storage: &mut Storage, cmd: ResetCommands) -> LedgerResult<()> {
    let mut service = MaintenanceService::new(storage);

    match cmd {
        ResetCommands::Transactions { yes: false } | ResetCommands::All { yes: false } => {
            println!("This permanently deletes data. Run again with --yes to continue.");
        }
        ResetCommands::Transactions { yes: true } => {
            let removed = service.reset_transactions()?;
            println!("Removed {} transactions; all balances are now zero.", removed);
        }
        ResetCommands::All { yes: true } => {
            service.reset_all()?;
            println!("All wallets, categories and transactions removed.");
        }
    }

    Ok(())
}

/// Handle the check command
pub fn handle_check_command(
    storage: &mut Storage,
    settings: &Settings,
    fix: bool,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let mut service = MaintenanceService::new(storage);
    let report = service.check_integrity();

    if report.is_clean() {
        println!("Ledger is consistent.");
        return Ok(());
    }

    for mismatch in &report.mismatches {
        println!(
            "Balance mismatch in {}: stored {}, transactions sum to {} (off by {})",
            mismatch.wallet_name,
            mismatch.cached.format_with_symbol(symbol),
            mismatch.computed.format_with_symbol(symbol),
            mismatch.difference().format_with_symbol(symbol)
        );
    }
    for orphan in &report.orphans {
        println!("Transaction {} refers to a missing wallet or category", orphan);
    }

    if fix && !report.mismatches.is_empty() {
        let fixed = service.rebuild_balances()?;
        println!("Rebuilt {} wallet balances from transactions.", fixed.len());
    } else if !report.mismatches.is_empty() {
        println!("Run with --fix to rebuild balances from transactions.");
    }

    Ok(())
}

/// Handle the history command
pub fn handle_history_command(storage: &Storage, count: usize) -> LedgerResult<()> {
    let Some(logger) = storage.audit_logger() else {
        println!("Audit logging is disabled.");
        return Ok(());
    };

    let entries = logger.read_recent(count)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry);
    }

    Ok(())
}
