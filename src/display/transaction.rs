//! Transaction display formatting

use crate::models::Transaction;
use crate::reports::NameLookup;

use super::width_of;

/// Transactions with wallet and category names resolved
pub fn format_transaction_list(
    transactions: &[&Transaction],
    lookup: &NameLookup<'_>,
    symbol: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let wallet_width = width_of(
        transactions.iter().map(|t| lookup.wallet_name(t.wallet_id)),
        "Wallet",
    );
    let category_width = width_of(
        transactions.iter().map(|t| lookup.category_label(t.category_id)),
        "Category",
    );

    let mut output = String::new();
    output.push_str(&format!(
        "{:<20}  {:<10}  {:<wallet_width$}  {:<category_width$}  {:>16}  {}\n",
        "ID", "Date", "Wallet", "Category", "Amount", "Note",
    ));
    output.push_str(&format!(
        "{:-<20}  {:-<10}  {:-<wallet_width$}  {:-<category_width$}  {:->16}  {:-<4}\n",
        "", "", "", "", "", "",
    ));

    for txn in transactions {
        output.push_str(&format!(
            "{:<20}  {:<10}  {:<wallet_width$}  {:<category_width$}  {:>16}  {}\n",
            txn.id.to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            lookup.wallet_name(txn.wallet_id),
            lookup.category_label(txn.category_id),
            txn.amount.format_with_symbol(symbol),
            txn.note,
        ));
    }

    output
}

/// Compact register for a single wallet: date, category label, amount, note
pub fn format_transaction_register(rows: &[(&Transaction, &str)], symbol: &str) -> String {
    let label_width = width_of(rows.iter().map(|(_, label)| *label), "Category");

    let mut output = String::new();
    for (txn, label) in rows {
        output.push_str(&format!(
            "  {}  {:<label_width$}  {:>16}  {}\n",
            txn.date.format("%Y-%m-%d"),
            label,
            txn.amount.format_with_symbol(symbol),
            txn.note,
        ));
    }
    output
}

/// Detail view of one transaction
pub fn format_transaction_details(
    txn: &Transaction,
    lookup: &NameLookup<'_>,
    counterpart: Option<&Transaction>,
    symbol: &str,
) -> String {
    let mut output = format!("Transaction {}\n", txn.id);
    output.push_str(&format!("  Date:     {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("  Wallet:   {}\n", lookup.wallet_name(txn.wallet_id)));
    output.push_str(&format!(
        "  Category: {}\n",
        lookup.category_label(txn.category_id)
    ));
    output.push_str(&format!(
        "  Amount:   {}\n",
        txn.amount.format_with_symbol(symbol)
    ));
    if !txn.note.is_empty() {
        output.push_str(&format!("  Note:     {}\n", txn.note));
    }
    if let Some(pair) = counterpart {
        output.push_str(&format!(
            "  Paired:   {} on {}\n",
            pair.id,
            lookup.wallet_name(pair.wallet_id)
        ));
    }
    output
}
