//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_list};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, TransactionId};
use crate::reports::{NameLookup, TransactionFilter};
use crate::services::{
    today, CreateTransactionInput, TransactionPatch, TransactionService, TransferService,
};
use crate::storage::Storage;

use super::{parse_date, parse_money, resolve_category, resolve_wallet};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// Wallet name or ID
        wallet: String,
        /// Category name or ID
        category: String,
        /// Amount; the sign comes from the category type
        amount: String,
        /// Transaction date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Note
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// List transactions, newest first
    List {
        /// Search notes, wallet and category names
        #[arg(short, long)]
        query: Option<String>,
        /// Only this wallet
        #[arg(short, long)]
        wallet: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Earliest date (inclusive)
        #[arg(long)]
        from: Option<String>,
        /// Latest date (inclusive)
        #[arg(long)]
        to: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show one transaction
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// Move to another wallet
        #[arg(short, long)]
        wallet: Option<String>,
        /// Change category
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
        /// For a transfer leg, also delete the paired leg
        #[arg(long)]
        pair: bool,
    },
}

fn parse_transaction_id(input: &str) -> LedgerResult<TransactionId> {
    input
        .parse()
        .map_err(|_| LedgerError::Validation(format!("Invalid transaction ID: '{}'", input)))
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        TransactionCommands::Add {
            wallet,
            category,
            amount,
            date,
            note,
        } => {
            let input = CreateTransactionInput {
                wallet_id: Some(resolve_wallet(storage, &wallet)?),
                category_id: Some(resolve_category(storage, &category)?),
                amount: Some(parse_money(&amount)?),
                date: Some(
                    date.map(|d| parse_date(&d, date_format))
                        .transpose()?
                        .unwrap_or_else(today),
                ),
                note,
            };

            let txn = TransactionService::new(storage).create(input)?;
            println!(
                "Recorded {} on {} ({})",
                txn.amount.format_with_symbol(symbol),
                txn.date.format(date_format),
                txn.id
            );
        }

        TransactionCommands::List {
            query,
            wallet,
            category,
            from,
            to,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(query) = query {
                filter = filter.query(query);
            }
            if let Some(wallet) = wallet {
                filter = filter.wallet(resolve_wallet(storage, &wallet)?);
            }
            if let Some(category) = category {
                filter = filter.category(resolve_category(storage, &category)?);
            }
            if from.is_some() || to.is_some() {
                let start = match from {
                    Some(d) => parse_date(&d, date_format)?,
                    None => NaiveDate::MIN,
                };
                let end = match to {
                    Some(d) => parse_date(&d, date_format)?,
                    None => NaiveDate::MAX,
                };
                filter = filter.date_range(start, end);
            }

            let found = TransactionService::new(storage).list(&filter);
            let rows: Vec<&Transaction> = found.iter().collect();
            let lookup = NameLookup::new(storage.wallets(), storage.categories());
            print!("{}", format_transaction_list(&rows, &lookup, symbol));
        }

        TransactionCommands::Show { id } => {
            let id = parse_transaction_id(&id)?;
            let service = TransferService::new(storage);
            let counterpart = service.counterpart(id)?.cloned();

            let data = storage.data();
            let txn = data
                .transaction(id)
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
            let lookup = NameLookup::new(&data.wallets, &data.categories);
            print!(
                "{}",
                format_transaction_details(txn, &lookup, counterpart.as_ref(), symbol)
            );
        }

        TransactionCommands::Edit {
            id,
            wallet,
            category,
            amount,
            date,
            note,
        } => {
            let id = parse_transaction_id(&id)?;
            let patch = TransactionPatch {
                wallet_id: wallet.map(|w| resolve_wallet(storage, &w)).transpose()?,
                category_id: category
                    .map(|c| resolve_category(storage, &c))
                    .transpose()?,
                amount: amount.map(|a| parse_money(&a)).transpose()?,
                date: date.map(|d| parse_date(&d, date_format)).transpose()?,
                note,
            };

            let updated = TransactionService::new(storage).update(id, patch)?;
            println!(
                "Updated {}: {} on {}",
                updated.id,
                updated.amount.format_with_symbol(symbol),
                updated.date.format(date_format)
            );
        }

        TransactionCommands::Delete { id, pair } => {
            let id = parse_transaction_id(&id)?;
            let removed = if pair {
                TransferService::new(storage).delete_transfer(id)?
            } else {
                vec![TransactionService::new(storage).delete(id)?]
            };

            for txn in &removed {
                println!(
                    "Deleted {} ({})",
                    txn.id,
                    txn.amount.format_with_symbol(symbol)
                );
            }
        }
    }

    Ok(())
}
