//! Service layer for Pocketbook
//!
//! Services hold the ledger rules: they validate input, build the next
//! ledger state from a snapshot, commit it through [`Storage`], and record
//! the change in the audit log. Every successful operation leaves each
//! wallet balance equal to the sum of its transactions.
//!
//! [`Storage`]: crate::storage::Storage

pub mod category;
pub mod import;
pub mod maintenance;
pub mod transaction;
pub mod transfer;
pub mod wallet;

pub use category::{CategoryPatch, CategoryService, NewCategory};
pub use import::{ImportService, ImportSummary};
pub use maintenance::{BalanceMismatch, IntegrityReport, MaintenanceService};
pub use transaction::{CreateTransactionInput, TransactionPatch, TransactionService};
pub use transfer::{TransferResult, TransferService};
pub use wallet::{WalletPatch, WalletService};

use chrono::{Local, NaiveDate};

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
