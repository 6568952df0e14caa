//! Transfer CLI command

use clap::Args;

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::services::{today, TransferService};
use crate::storage::Storage;

use super::{parse_date, parse_money, resolve_wallet};

/// Arguments for moving money between two wallets
#[derive(Args)]
pub struct TransferArgs {
    /// Source wallet name or ID
    pub from: String,
    /// Destination wallet name or ID
    pub to: String,
    /// Amount to move
    pub amount: String,
    /// Note added to both legs
    #[arg(short, long, default_value = "")]
    pub note: String,
    /// Transfer date (defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Handle the transfer command
pub fn handle_transfer_command(
    storage: &mut Storage,
    settings: &Settings,
    args: TransferArgs,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    let from = resolve_wallet(storage, &args.from)?;
    let to = resolve_wallet(storage, &args.to)?;
    let amount = parse_money(&args.amount)?;
    let date = match args.date {
        Some(d) => parse_date(&d, &settings.date_format)?,
        None => today(),
    };

    let result =
        TransferService::new(storage).create_transfer_on(from, to, amount, &args.note, date)?;

    println!(
        "Transferred {} ({} / {})",
        amount.format_with_symbol(symbol),
        result.from_transaction.id,
        result.to_transaction.id
    );
    for wallet_id in [from, to] {
        if let Some(wallet) = storage.data().wallet(wallet_id) {
            println!(
                "  {}: {}",
                wallet.name,
                wallet.balance.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
