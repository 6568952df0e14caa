//! Import service
//!
//! Replaces the whole ledger with a validated backup document.

use chrono::NaiveDate;
use tracing::info;

use crate::audit::{AuditEntry, Operation};
use crate::error::LedgerResult;
use crate::export::ExportDocument;
use crate::models::{Transaction, ADJUSTMENT_NOTE, OPENING_BALANCE_NOTE};
use crate::storage::{Collection, Storage};

use super::today;

/// What an import changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub wallets: usize,
    pub categories: usize,
    pub transactions: usize,
    /// Opening/adjustment rows added so balances match transactions
    pub reconciled: usize,
}

/// Service for importing backups
pub struct ImportService<'a> {
    storage: &'a mut Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Overwrite all three collections with `document`
    ///
    /// Wallets whose stored balance differs from the sum of their
    /// transactions get one extra row for the difference: an opening balance
    /// when the wallet has no transactions yet, otherwise an adjustment.
    pub fn import(&mut self, document: ExportDocument) -> LedgerResult<ImportSummary> {
        document.validate()?;
        let mut next = document.into_data();
        self.storage.ids().observe(next.max_id());

        let mut extra = Vec::new();
        for wallet in &next.wallets {
            let computed = next.computed_balance(wallet.id);
            let difference = wallet.balance - computed;
            if difference.is_zero() {
                continue;
            }

            let first_date: Option<NaiveDate> = next
                .transactions
                .iter()
                .filter(|t| t.wallet_id == wallet.id)
                .map(|t| t.date)
                .min();

            let mut txn = Transaction::new(
                self.storage.ids().transaction(),
                wallet.id,
                first_date.unwrap_or_else(today),
                difference,
            );
            txn.note = if first_date.is_some() {
                ADJUSTMENT_NOTE.to_string()
            } else {
                OPENING_BALANCE_NOTE.to_string()
            };
            extra.push(txn);
        }

        let summary = ImportSummary {
            wallets: next.wallets.len(),
            categories: next.categories.len(),
            transactions: next.transactions.len(),
            reconciled: extra.len(),
        };
        next.transactions.extend(extra);

        self.storage.commit(next, &Collection::ALL)?;

        info!(
            wallets = summary.wallets,
            categories = summary.categories,
            transactions = summary.transactions,
            reconciled = summary.reconciled,
            "Imported ledger"
        );
        self.storage.log_entry(&AuditEntry::ledger(
            Operation::Import,
            format!(
                "{} wallets, {} categories, {} transactions ({} reconciled)",
                summary.wallets, summary.categories, summary.transactions, summary.reconciled
            ),
        ));

        Ok(summary)
    }
}
