//! CSV export of transactions
//!
//! One row per transaction with wallet and category names resolved, for
//! spreadsheets.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::reports::NameLookup;
use crate::storage::LedgerData;

/// Write every transaction as CSV, oldest first
pub fn export_transactions_csv<W: Write>(data: &LedgerData, writer: W) -> LedgerResult<()> {
    let lookup = NameLookup::new(&data.wallets, &data.categories);
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record([
        "id", "date", "wallet", "category", "note", "amount", "transfer",
    ])
    .map_err(export_error)?;

    let mut transactions: Vec<_> = data.transactions.iter().collect();
    transactions.sort_by_key(|t| (t.date, t.id));

    for txn in transactions {
        csv.write_record([
            txn.id.value().to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            lookup.wallet_name(txn.wallet_id).to_string(),
            lookup.category_label(txn.category_id).to_string(),
            txn.note.clone(),
            txn.amount.amount().to_string(),
            txn.is_transfer.to_string(),
        ])
        .map_err(export_error)?;
    }

    csv.flush()
        .map_err(|e| LedgerError::Export(format!("Failed to flush CSV: {}", e)))?;
    Ok(())
}

fn export_error(err: csv::Error) -> LedgerError {
    LedgerError::Export(format!("Failed to write CSV: {}", err))
}
