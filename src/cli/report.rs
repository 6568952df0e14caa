//! Summary and statistics CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_category_shares, format_monthly, format_summary};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;
use crate::reports::{
    by_month, category_breakdown, total_balance, totals, transfer_totals, MonthKey,
};
use crate::storage::Storage;

/// Statistics subcommands
#[derive(Subcommand)]
pub enum StatsCommands {
    /// Income and expense per month
    Monthly,
    /// Spending share per expense category
    Categories {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
}

fn parse_month(input: &str) -> LedgerResult<MonthKey> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .map(MonthKey::of)
        .map_err(|_| LedgerError::Validation(format!("Invalid month: '{}'. Use YYYY-MM", input)))
}

fn in_month<'a>(
    transactions: &'a [Transaction],
    month: Option<MonthKey>,
) -> impl Iterator<Item = &'a Transaction> {
    transactions
        .iter()
        .filter(move |t| month.map_or(true, |m| MonthKey::of(t.date) == m))
}

/// Handle the summary command
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    month: Option<String>,
) -> LedgerResult<()> {
    let month = month.as_deref().map(parse_month).transpose()?;
    let data = storage.data();

    if let Some(month) = month {
        println!("Summary for {}", month.label());
    }

    let income_expense = totals(in_month(&data.transactions, month));
    let transfers = transfer_totals(in_month(&data.transactions, month));
    print!(
        "{}",
        format_summary(
            total_balance(&data.wallets),
            &income_expense,
            &transfers,
            &settings.currency_symbol
        )
    );

    Ok(())
}

/// Handle a stats command
pub fn handle_stats_command(
    storage: &Storage,
    settings: &Settings,
    cmd: StatsCommands,
) -> LedgerResult<()> {
    let data = storage.data();
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        StatsCommands::Monthly => {
            print!("{}", format_monthly(&by_month(&data.transactions), symbol));
        }
        StatsCommands::Categories { month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let rows: Vec<Transaction> = in_month(&data.transactions, month).cloned().collect();
            let shares = category_breakdown(&data.categories, &rows);
            print!("{}", format_category_shares(&shares, symbol));
        }
    }

    Ok(())
}
