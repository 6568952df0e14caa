//! Wallet display formatting
//!
//! Formats wallets for terminal output in table and detail views.

use crate::models::{Money, Transaction, Wallet};

use super::transaction::format_transaction_register;
use super::width_of;

/// Format wallets with balances as a table, with a total row
pub fn format_wallet_list(wallets: &[Wallet], symbol: &str) -> String {
    if wallets.is_empty() {
        return "No wallets found.".to_string();
    }

    let name_width = width_of(wallets.iter().map(|w| w.name.as_str()), "Name");
    let type_width = width_of(wallets.iter().map(|w| w.wallet_type.to_string()), "Type");

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:>16}\n",
        "Name", "Type", "Balance",
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<type_width$}  {:->16}\n",
        "", "", "",
    ));

    for wallet in wallets {
        output.push_str(&format!(
            "{:<name_width$}  {:<type_width$}  {:>16}\n",
            wallet.name,
            wallet.wallet_type.to_string(),
            wallet.balance.format_with_symbol(symbol),
        ));
    }

    let total: Money = wallets.iter().map(|w| w.balance).sum();
    output.push_str(&format!(
        "{:-<name_width$}  {:-<type_width$}  {:->16}\n",
        "", "", "",
    ));
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:>16}\n",
        "TOTAL",
        "",
        total.format_with_symbol(symbol),
    ));

    output
}

/// A wallet's details followed by its recent transactions
pub fn format_wallet_details(
    wallet: &Wallet,
    recent: &[(&Transaction, &str)],
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Wallet: {}\n", wallet.name));
    output.push_str(&format!("  ID:       {}\n", wallet.id));
    output.push_str(&format!("  Type:     {}\n", wallet.wallet_type));
    output.push_str(&format!(
        "  Balance:  {}\n",
        wallet.balance.format_with_symbol(symbol)
    ));

    if !recent.is_empty() {
        output.push_str("\nRecent transactions:\n");
        output.push_str(&format_transaction_register(recent, symbol));
    }

    output
}
