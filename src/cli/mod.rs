//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod export;
pub mod maintenance;
pub mod report;
pub mod transaction;
pub mod transfer;
pub mod wallet;

pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, handle_import_command, ExportCommands};
pub use maintenance::{
    handle_check_command, handle_history_command, handle_reset_command, ResetCommands,
};
pub use report::{handle_stats_command, handle_summary_command, StatsCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use transfer::{handle_transfer_command, TransferArgs};
pub use wallet::{handle_wallet_command, WalletCommands};

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryId, CategoryType, Money, WalletId, WalletType};
use crate::storage::Storage;

/// Parse an amount typed on the command line
pub(crate) fn parse_money(input: &str) -> LedgerResult<Money> {
    Money::parse(input).map_err(|e| {
        LedgerError::Validation(format!(
            "{}. Use a format like '30000', '30.000' or '1250,50'",
            e
        ))
    })
}

/// Parse a date using the configured format, falling back to ISO dates
pub(crate) fn parse_date(input: &str, format: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(input, format)
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .map_err(|_| {
            LedgerError::Validation(format!(
                "Invalid date: '{}'. Expected format {}",
                input, format
            ))
        })
}

pub(crate) fn parse_wallet_type(input: &str) -> LedgerResult<WalletType> {
    WalletType::parse(input).ok_or_else(|| {
        LedgerError::Validation(format!(
            "Invalid wallet type: '{}'. Valid types: cash, bank, ewallet",
            input
        ))
    })
}

pub(crate) fn parse_category_type(input: &str) -> LedgerResult<CategoryType> {
    CategoryType::parse(input).ok_or_else(|| {
        LedgerError::Validation(format!(
            "Invalid category type: '{}'. Valid types: income, expense",
            input
        ))
    })
}

/// Resolve a wallet by name or id
pub(crate) fn resolve_wallet(storage: &Storage, identifier: &str) -> LedgerResult<WalletId> {
    storage
        .data()
        .find_wallet(identifier)
        .map(|w| w.id)
        .ok_or_else(|| LedgerError::wallet_not_found(identifier))
}

/// Resolve a category by name or id
pub(crate) fn resolve_category(storage: &Storage, identifier: &str) -> LedgerResult<CategoryId> {
    storage
        .data()
        .find_category(identifier)
        .map(|c| c.id)
        .ok_or_else(|| LedgerError::category_not_found(identifier))
}
