//! Transaction model
//!
//! A single signed movement of money against one wallet. Positive amounts
//! increase the wallet balance (income, transfer in), negative amounts
//! decrease it (expense, transfer out). Rows without a category are
//! transfer legs or balance bookkeeping (opening balance, adjustments) and
//! never count as income or expense.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId, WalletId};
use super::money::Money;

/// Note used for the transaction recording a wallet's opening balance
pub const OPENING_BALANCE_NOTE: &str = "Opening balance";

/// Note used for manual balance corrections
pub const ADJUSTMENT_NOTE: &str = "Balance adjustment";

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The wallet this transaction belongs to
    pub wallet_id: WalletId,

    /// Category (None for transfer legs and balance bookkeeping)
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Signed amount
    pub amount: Money,

    /// Transaction date
    pub date: NaiveDate,

    /// Free-text note
    #[serde(default)]
    pub note: String,

    /// Whether this row is one leg of a transfer
    #[serde(default)]
    pub is_transfer: bool,

    /// The paired leg of a transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_id: Option<TransactionId>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(id: TransactionId, wallet_id: WalletId, date: NaiveDate, amount: Money) -> Self {
        Self {
            id,
            wallet_id,
            category_id: None,
            amount,
            date,
            note: String::new(),
            is_transfer: false,
            transfer_id: None,
        }
    }

    /// Create a categorized transaction
    pub fn categorized(
        id: TransactionId,
        wallet_id: WalletId,
        category_id: CategoryId,
        date: NaiveDate,
        amount: Money,
        note: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(id, wallet_id, date, amount);
        txn.category_id = Some(category_id);
        txn.note = note.into();
        txn
    }

    /// Check if this transaction has no category
    pub fn is_uncategorized(&self) -> bool {
        self.category_id.is_none()
    }

    /// Check if this is an inflow (positive amount)
    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if this is an outflow (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.is_transfer && self.category_id.is_some() {
            return Err(TransactionValidationError::TransferWithCategory);
        }

        if self.transfer_id == Some(self.id) {
            return Err(TransactionValidationError::SelfLinkedTransfer);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.note,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    TransferWithCategory,
    SelfLinkedTransfer,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransferWithCategory => {
                write!(f, "Transfer transactions should not have a category")
            }
            Self::SelfLinkedTransfer => write!(f, "Transfer cannot be linked to itself"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
