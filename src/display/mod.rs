//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for the CLI.

pub mod category;
pub mod report;
pub mod transaction;
pub mod wallet;

pub use category::{format_budget_status, format_category_list};
pub use report::{
    format_bar, format_category_shares, format_monthly, format_percentage, format_summary,
};
pub use transaction::{
    format_transaction_details, format_transaction_list, format_transaction_register,
};
pub use wallet::{format_wallet_details, format_wallet_list};

/// Column width: the widest value or the header, in characters
pub(crate) fn width_of<I, S>(values: I, header: &str) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().chars().count())
        .max()
        .unwrap_or(0)
        .max(header.chars().count())
}
