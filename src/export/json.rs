//! JSON export and import
//!
//! The backup file is a single object holding the three collections in the
//! same shape they are stored in. Imports are checked record by record
//! before anything is written.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Transaction, Wallet};
use crate::storage::LedgerData;

/// Backup document: `{ wallets, categories, transactions }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// When the export was made; informational, ignored on import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,

    pub wallets: Vec<Wallet>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
}

impl ExportDocument {
    /// Snapshot the ledger for export
    pub fn from_data(data: &LedgerData) -> Self {
        Self {
            exported_at: Some(Utc::now()),
            wallets: data.wallets.clone(),
            categories: data.categories.clone(),
            transactions: data.transactions.clone(),
        }
    }

    pub fn into_data(self) -> LedgerData {
        LedgerData {
            wallets: self.wallets,
            categories: self.categories,
            transactions: self.transactions,
        }
    }

    /// Check every record before the document may replace the ledger
    pub fn validate(&self) -> LedgerResult<()> {
        let mut wallet_ids = HashSet::new();
        for wallet in &self.wallets {
            if !wallet_ids.insert(wallet.id) {
                return Err(import_error(format!("duplicate wallet id {}", wallet.id)));
            }
            wallet
                .validate()
                .map_err(|e| import_error(format!("wallet {}: {}", wallet.id, e)))?;
        }

        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id) {
                return Err(import_error(format!(
                    "duplicate category id {}",
                    category.id
                )));
            }
            category
                .validate()
                .map_err(|e| import_error(format!("category {}: {}", category.id, e)))?;
        }

        let mut transaction_ids = HashSet::new();
        for txn in &self.transactions {
            if !transaction_ids.insert(txn.id) {
                return Err(import_error(format!("duplicate transaction id {}", txn.id)));
            }
            if !wallet_ids.contains(&txn.wallet_id) {
                return Err(import_error(format!(
                    "transaction {} references unknown wallet {}",
                    txn.id, txn.wallet_id
                )));
            }
            if let Some(category_id) = txn.category_id {
                if !category_ids.contains(&category_id) {
                    return Err(import_error(format!(
                        "transaction {} references unknown category {}",
                        txn.id, category_id
                    )));
                }
            }
            txn.validate()
                .map_err(|e| import_error(format!("transaction {}: {}", txn.id, e)))?;
        }

        Ok(())
    }
}

fn import_error(message: String) -> LedgerError {
    LedgerError::Import(message)
}

/// Write the document as pretty-printed JSON
pub fn export_json<W: Write>(data: &LedgerData, writer: &mut W) -> LedgerResult<()> {
    let document = ExportDocument::from_data(data);
    serde_json::to_writer_pretty(&mut *writer, &document)
        .map_err(|e| LedgerError::Export(format!("Failed to serialize export: {}", e)))?;
    writeln!(writer).map_err(|e| LedgerError::Export(format!("Failed to write export: {}", e)))?;
    Ok(())
}

/// Parse and validate a backup document
///
/// All three arrays must be present. Any malformed or inconsistent record
/// rejects the whole document.
pub fn import_document(json: &str) -> LedgerResult<ExportDocument> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| import_error(format!("not valid JSON: {}", e)))?;

    for key in ["wallets", "categories", "transactions"] {
        if !value.get(key).is_some_and(serde_json::Value::is_array) {
            return Err(import_error(format!("missing '{}' array", key)));
        }
    }

    let document: ExportDocument = serde_json::from_value(value)
        .map_err(|e| import_error(format!("malformed record: {}", e)))?;
    document.validate()?;
    Ok(document)
}
