//! Wallet CLI commands
//!
//! Implements CLI commands for wallet management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_wallet_details, format_wallet_list};
use crate::error::LedgerResult;
use crate::reports::{filter_transactions, NameLookup, TransactionFilter};
use crate::services::{today, WalletPatch, WalletService};
use crate::storage::Storage;

use super::{parse_date, parse_money, parse_wallet_type, resolve_wallet};

/// Wallet subcommands
#[derive(Subcommand)]
pub enum WalletCommands {
    /// Create a new wallet
    Add {
        /// Wallet name
        name: String,
        /// Wallet type (cash, bank, ewallet)
        #[arg(short = 't', long)]
        wallet_type: Option<String>,
        /// Opening balance (e.g., "250000" or "250.000")
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        balance: String,
        /// Date of the opening balance
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List all wallets with balances
    List,
    /// Show wallet details and recent transactions
    Show {
        /// Wallet name or ID
        wallet: String,
        /// Number of recent transactions to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Edit a wallet
    Edit {
        /// Wallet name or ID
        wallet: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type
        #[arg(short = 't', long)]
        wallet_type: Option<String>,
    },
    /// Set a wallet's balance, recording the difference as an adjustment
    Adjust {
        /// Wallet name or ID
        wallet: String,
        /// The balance the wallet should have
        #[arg(allow_hyphen_values = true)]
        balance: String,
        /// Date of the adjustment
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a wallet and all of its transactions
    Delete {
        /// Wallet name or ID
        wallet: String,
    },
}

/// Handle a wallet command
pub fn handle_wallet_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: WalletCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        WalletCommands::Add {
            name,
            wallet_type,
            balance,
            date,
        } => {
            let wallet_type = match wallet_type {
                Some(t) => parse_wallet_type(&t)?,
                None => settings.default_wallet_type,
            };
            let opening = parse_money(&balance)?;
            let date = match date {
                Some(d) => parse_date(&d, &settings.date_format)?,
                None => today(),
            };

            let wallet =
                WalletService::new(storage).create_on(&name, wallet_type, opening, date)?;

            println!("Created wallet: {}", wallet.name);
            println!("  Type:    {}", wallet.wallet_type);
            println!("  Balance: {}", wallet.balance.format_with_symbol(symbol));
            println!("  ID:      {}", wallet.id);
        }

        WalletCommands::List => {
            print!("{}", format_wallet_list(storage.wallets(), symbol));
        }

        WalletCommands::Show { wallet, limit } => {
            let id = resolve_wallet(storage, &wallet)?;
            let data = storage.data();
            let lookup = NameLookup::new(&data.wallets, &data.categories);
            let filter = TransactionFilter::new().wallet(id).limit(limit);

            let recent: Vec<_> = filter_transactions(&data.transactions, &lookup, &filter)
                .into_iter()
                .map(|t| (t, lookup.category_label(t.category_id)))
                .collect();

            if let Some(found) = data.wallet(id) {
                print!("{}", format_wallet_details(found, &recent, symbol));
            }
        }

        WalletCommands::Edit {
            wallet,
            name,
            wallet_type,
        } => {
            if name.is_none() && wallet_type.is_none() {
                println!("No changes specified. Use --name or --wallet-type.");
                return Ok(());
            }

            let id = resolve_wallet(storage, &wallet)?;
            let patch = WalletPatch {
                name,
                wallet_type: wallet_type.as_deref().map(parse_wallet_type).transpose()?,
            };

            let updated = WalletService::new(storage).update(id, patch)?;
            println!("Updated wallet: {} ({})", updated.name, updated.wallet_type);
        }

        WalletCommands::Adjust {
            wallet,
            balance,
            date,
        } => {
            let id = resolve_wallet(storage, &wallet)?;
            let target = parse_money(&balance)?;
            let date = match date {
                Some(d) => parse_date(&d, &settings.date_format)?,
                None => today(),
            };

            match WalletService::new(storage).adjust_balance(id, target, date)? {
                Some(txn) => println!(
                    "Adjusted balance by {} (transaction {})",
                    txn.amount.format_with_symbol(symbol),
                    txn.id
                ),
                None => println!("Balance already matches; nothing to adjust."),
            }
        }

        WalletCommands::Delete { wallet } => {
            let id = resolve_wallet(storage, &wallet)?;
            let (deleted, removed) = WalletService::new(storage).delete(id)?;
            println!(
                "Deleted wallet: {} ({} transactions removed)",
                deleted.name,
                removed.len()
            );
        }
    }

    Ok(())
}
