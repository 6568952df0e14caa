//! Transaction service
//!
//! Creating, editing and deleting a transaction always moves the owning
//! wallet's balance in the same commit. Amounts come in as magnitudes; the
//! sign is taken from the category type.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryId, Money, Transaction, TransactionId, WalletId};
use crate::reports::{filter_transactions, NameLookup, TransactionFilter};
use crate::storage::{Collection, LedgerData, Storage};

/// Input for a new categorized transaction
///
/// Every field but `note` is required; they are optional here so missing
/// input surfaces as a validation error rather than at the call site.
#[derive(Debug, Clone, Default)]
pub struct CreateTransactionInput {
    pub wallet_id: Option<WalletId>,
    pub category_id: Option<CategoryId>,
    /// Non-negative magnitude
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub note: String,
}

/// Fields of a transaction that can be edited
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub wallet_id: Option<WalletId>,
    pub category_id: Option<CategoryId>,
    /// Non-negative magnitude
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a mut Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Record an income or expense
    pub fn create(&mut self, input: CreateTransactionInput) -> LedgerResult<Transaction> {
        let wallet_id = input
            .wallet_id
            .ok_or_else(|| LedgerError::Validation("Wallet is required".into()))?;
        let category_id = input
            .category_id
            .ok_or_else(|| LedgerError::Validation("Category is required".into()))?;
        let magnitude = input
            .amount
            .ok_or_else(|| LedgerError::Validation("Amount is required".into()))?;
        let date = input
            .date
            .ok_or_else(|| LedgerError::Validation("Date is required".into()))?;
        ensure_positive(magnitude)?;

        let mut next = self.storage.snapshot();
        ensure_wallet_exists(&next, wallet_id)?;
        let category = next.category(category_id).ok_or_else(|| {
            LedgerError::Validation(format!("Category {} does not exist", category_id))
        })?;

        let amount = category.category_type.signed(magnitude);
        let txn = Transaction::categorized(
            self.storage.ids().transaction(),
            wallet_id,
            category_id,
            date,
            amount,
            input.note.trim(),
        );

        next.apply_to_wallet(wallet_id, amount)?;
        next.transactions.push(txn.clone());
        self.storage
            .commit(next, &[Collection::Wallets, Collection::Transactions])?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.note.clone()),
            &txn,
        );

        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.storage.data().transaction(id)
    }

    /// Transactions matching `filter`, newest first
    pub fn list(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        let lookup = NameLookup::new(self.storage.wallets(), self.storage.categories());
        filter_transactions(self.storage.transactions(), &lookup, filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Edit a transaction
    ///
    /// The old amount is taken off the original wallet and the new amount is
    /// put on the resulting wallet, so moving a row between wallets keeps
    /// both balances right. Rows without a category (transfer legs, opening
    /// balances, adjustments) keep their direction and cannot gain one.
    pub fn update(&mut self, id: TransactionId, patch: TransactionPatch) -> LedgerResult<Transaction> {
        let mut next = self.storage.snapshot();
        let before = next
            .transaction(id)
            .cloned()
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        let wallet_id = patch.wallet_id.unwrap_or(before.wallet_id);
        ensure_wallet_exists(&next, wallet_id)?;

        let category_id = match (patch.category_id, before.category_id) {
            (Some(_), None) => {
                return Err(LedgerError::Validation(
                    "Cannot assign a category to a transfer or balance entry".into(),
                ))
            }
            (Some(requested), Some(_)) => Some(requested),
            (None, existing) => existing,
        };

        let magnitude = patch.amount.unwrap_or_else(|| before.amount.abs());
        ensure_positive(magnitude)?;

        let amount = match category_id {
            Some(cid) => {
                let category = next.category(cid).ok_or_else(|| {
                    LedgerError::Validation(format!("Category {} does not exist", cid))
                })?;
                category.category_type.signed(magnitude)
            }
            None if before.amount.is_negative() => -magnitude,
            None => magnitude,
        };

        next.apply_to_wallet(before.wallet_id, -before.amount)?;
        next.apply_to_wallet(wallet_id, amount)?;

        let txn = next
            .transaction_mut(id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
        txn.wallet_id = wallet_id;
        txn.category_id = category_id;
        txn.amount = amount;
        if let Some(date) = patch.date {
            txn.date = date;
        }
        if let Some(note) = patch.note {
            txn.note = note.trim().to_string();
        }
        let after = txn.clone();

        self.storage
            .commit(next, &[Collection::Wallets, Collection::Transactions])?;
        self.storage.log_update(
            EntityType::Transaction,
            id.to_string(),
            Some(after.note.clone()),
            &before,
            &after,
        );

        Ok(after)
    }

    /// Delete a single transaction and reverse it on its wallet
    ///
    /// Only this row is removed, even when it is one leg of a transfer. Use
    /// `TransferService::delete_transfer` to remove both legs.
    pub fn delete(&mut self, id: TransactionId) -> LedgerResult<Transaction> {
        let mut next = self.storage.snapshot();
        let position = next
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        let removed = next.transactions.remove(position);
        next.apply_to_wallet(removed.wallet_id, -removed.amount)?;

        self.storage
            .commit(next, &[Collection::Wallets, Collection::Transactions])?;
        self.storage.log_delete(
            EntityType::Transaction,
            id.to_string(),
            Some(removed.note.clone()),
            &removed,
        );

        Ok(removed)
    }
}

fn ensure_positive(magnitude: Money) -> LedgerResult<()> {
    if magnitude.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::Validation(
            "Amount must be greater than zero".into(),
        ))
    }
}

fn ensure_wallet_exists(data: &LedgerData, id: WalletId) -> LedgerResult<()> {
    if data.wallet(id).is_none() {
        return Err(LedgerError::Validation(format!(
            "Wallet {} does not exist",
            id
        )));
    }
    Ok(())
}
