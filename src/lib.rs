//! Pocketbook - personal wallet ledger
//!
//! This library keeps a small personal ledger: wallets with cached balances,
//! income and expense categories with optional budgets, and the
//! transactions that move money in and out of wallets, including transfers
//! between them. Every write goes through the service layer, which keeps
//! each wallet's balance equal to the sum of its transactions.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory and settings
//! - `error`: Custom error types
//! - `models`: Wallets, categories, transactions, ids and money
//! - `storage`: Key-value backed collections with all-or-nothing commits
//! - `services`: Ledger rules (create/edit/delete, transfers, import, reset)
//! - `reports`: Read-only totals, budget usage and monthly breakdowns
//! - `audit`: Append-only audit log
//! - `export`: JSON backup and CSV export
//! - `display`: Plain-text formatting for the CLI
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use pocketbook::models::{Money, WalletType};
//! use pocketbook::services::WalletService;
//! use pocketbook::storage::Storage;
//!
//! let mut storage = Storage::in_memory();
//! let wallet = WalletService::new(&mut storage)
//!     .create("Dompet", WalletType::Cash, Money::from(100000))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use models::{Category, CategoryType, Money, Transaction, Wallet, WalletType};
pub use storage::Storage;
