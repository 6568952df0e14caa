//! Transfer service
//!
//! A transfer is two uncategorized transactions: an outflow from the source
//! wallet and an inflow to the destination wallet. Each leg carries the
//! other's id in `transfer_id`.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionId, WalletId};
use crate::storage::{Collection, Storage};

use super::today;

/// Service for transfers between wallets
pub struct TransferService<'a> {
    storage: &'a mut Storage,
}

/// Result of creating a transfer
#[derive(Debug, Clone)]
pub struct TransferResult {
    /// The outflow transaction (from source wallet)
    pub from_transaction: Transaction,
    /// The inflow transaction (to destination wallet)
    pub to_transaction: Transaction,
}

impl<'a> TransferService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Transfer funds today
    pub fn create_transfer(
        &mut self,
        from_wallet_id: WalletId,
        to_wallet_id: WalletId,
        amount: Money,
        note: &str,
    ) -> LedgerResult<TransferResult> {
        self.create_transfer_on(from_wallet_id, to_wallet_id, amount, note, today())
    }

    /// Transfer funds on a given date
    ///
    /// Either both legs are recorded and both balances move, or nothing
    /// changes.
    pub fn create_transfer_on(
        &mut self,
        from_wallet_id: WalletId,
        to_wallet_id: WalletId,
        amount: Money,
        note: &str,
        date: NaiveDate,
    ) -> LedgerResult<TransferResult> {
        if from_wallet_id == to_wallet_id {
            return Err(LedgerError::Validation(
                "Cannot transfer to the same wallet".into(),
            ));
        }
        if !amount.is_positive() {
            return Err(LedgerError::Validation(
                "Transfer amount must be greater than zero".into(),
            ));
        }

        let mut next = self.storage.snapshot();
        let from_wallet = next
            .wallet(from_wallet_id)
            .cloned()
            .ok_or_else(|| LedgerError::wallet_not_found(from_wallet_id.to_string()))?;
        let to_wallet = next
            .wallet(to_wallet_id)
            .cloned()
            .ok_or_else(|| LedgerError::wallet_not_found(to_wallet_id.to_string()))?;

        if from_wallet.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                wallet: from_wallet.name,
                needed: amount,
                available: from_wallet.balance,
            });
        }

        let out_id = self.storage.ids().transaction();
        let in_id = self.storage.ids().transaction();

        let mut from_txn = Transaction::new(out_id, from_wallet_id, date, -amount);
        from_txn.note = leg_note("Transfer to", &to_wallet.name, note);
        from_txn.is_transfer = true;
        from_txn.transfer_id = Some(in_id);

        let mut to_txn = Transaction::new(in_id, to_wallet_id, date, amount);
        to_txn.note = leg_note("Transfer from", &from_wallet.name, note);
        to_txn.is_transfer = true;
        to_txn.transfer_id = Some(out_id);

        next.apply_to_wallet(from_wallet_id, -amount)?;
        next.apply_to_wallet(to_wallet_id, amount)?;
        next.transactions.push(from_txn.clone());
        next.transactions.push(to_txn.clone());

        self.storage
            .commit(next, &[Collection::Wallets, Collection::Transactions])?;

        for txn in [&from_txn, &to_txn] {
            self.storage.log_create(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.note.clone()),
                txn,
            );
        }

        Ok(TransferResult {
            from_transaction: from_txn,
            to_transaction: to_txn,
        })
    }

    /// The paired leg of a transfer, if it still exists
    pub fn counterpart(&self, transaction_id: TransactionId) -> LedgerResult<Option<&Transaction>> {
        let data = self.storage.data();
        let txn = data
            .transaction(transaction_id)
            .ok_or_else(|| LedgerError::transaction_not_found(transaction_id.to_string()))?;

        Ok(txn.transfer_id.and_then(|linked| data.transaction(linked)))
    }

    /// Delete both legs of a transfer and reverse both balances
    ///
    /// A leg whose pair was already deleted is removed on its own.
    pub fn delete_transfer(&mut self, transaction_id: TransactionId) -> LedgerResult<Vec<Transaction>> {
        let mut next = self.storage.snapshot();
        let txn = next
            .transaction(transaction_id)
            .cloned()
            .ok_or_else(|| LedgerError::transaction_not_found(transaction_id.to_string()))?;

        if !txn.is_transfer {
            return Err(LedgerError::Validation(format!(
                "Transaction {} is not a transfer",
                transaction_id
            )));
        }

        let ids: Vec<TransactionId> = std::iter::once(txn.id).chain(txn.transfer_id).collect();
        let (removed, kept): (Vec<Transaction>, Vec<Transaction>) = next
            .transactions
            .into_iter()
            .partition(|t| ids.contains(&t.id));
        next.transactions = kept;
        for leg in &removed {
            next.apply_to_wallet(leg.wallet_id, -leg.amount)?;
        }

        self.storage
            .commit(next, &[Collection::Wallets, Collection::Transactions])?;

        for leg in &removed {
            self.storage.log_delete(
                EntityType::Transaction,
                leg.id.to_string(),
                Some(leg.note.clone()),
                leg,
            );
        }

        Ok(removed)
    }
}

fn leg_note(direction: &str, wallet_name: &str, note: &str) -> String {
    let note = note.trim();
    if note.is_empty() {
        format!("{} {}", direction, wallet_name)
    } else {
        format!("{} {}: {}", direction, wallet_name, note)
    }
}
