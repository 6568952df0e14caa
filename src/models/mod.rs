//! Core data models for Pocketbook
//!
//! This module contains the data structures of the ledger: wallets,
//! categories, transactions, their ids, and the money type.

pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod wallet;

pub use category::{Category, CategoryType, DEFAULT_CATEGORY_COLOR};
pub use ids::{CategoryId, IdGenerator, TransactionId, WalletId};
pub use money::Money;
pub use transaction::{Transaction, ADJUSTMENT_NOTE, OPENING_BALANCE_NOTE};
pub use wallet::{Wallet, WalletType};
