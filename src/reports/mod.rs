//! Reports module for Pocketbook
//!
//! Read-only views over the ledger collections: dashboard totals, budget
//! usage, spending by category, monthly income/expense, and transaction
//! search. Nothing here mutates state.

pub mod budget;
pub mod filter;
pub mod monthly;
pub mod spending;
pub mod summary;

pub use budget::{budget_usage, BudgetUsage};
pub use filter::{filter_transactions, NameLookup, TransactionFilter, TRANSFER_LABEL};
pub use monthly::{by_month, MonthKey, MonthlySummary};
pub use spending::{by_category, category_breakdown, CategoryShare};
pub use summary::{total_balance, totals, transfer_totals, Totals, TransferTotals};
