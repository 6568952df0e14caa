//! Dashboard totals
//!
//! Income and expense only count categorized rows. Transfer legs are
//! reported separately, and opening/adjustment rows belong to neither.

use crate::models::{Money, Transaction, Wallet};

/// Income and expense totals, both non-negative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
}

impl Totals {
    /// Income minus expense
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Money moved between wallets, both non-negative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferTotals {
    pub outgoing: Money,
    pub incoming: Money,
}

pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.category_id.is_some())
        .fold(Totals::default(), |mut acc, t| {
            if t.is_inflow() {
                acc.income += t.amount;
            } else {
                acc.expense += t.amount.abs();
            }
            acc
        })
}

pub fn transfer_totals<'a, I>(transactions: I) -> TransferTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.category_id.is_none() && t.is_transfer)
        .fold(TransferTotals::default(), |mut acc, t| {
            if t.is_inflow() {
                acc.incoming += t.amount;
            } else {
                acc.outgoing += t.amount.abs();
            }
            acc
        })
}

/// Sum of all wallet balances
pub fn total_balance(wallets: &[Wallet]) -> Money {
    wallets.iter().map(|w| w.balance).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, TransactionId, WalletId, WalletType};
    use chrono::NaiveDate;

    fn row(id: u64, category: Option<u64>, amount: i64, transfer: bool) -> Transaction {
        let mut txn = Transaction::new(
            TransactionId::from_raw(id),
            WalletId::from_raw(1),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            Money::from(amount),
        );
        txn.category_id = category.map(CategoryId::from_raw);
        txn.is_transfer = transfer;
        txn
    }

    fn ledger() -> Vec<Transaction> {
        vec![
            row(1, Some(10), 5000000, false),
            row(2, Some(11), -30000, false),
            row(3, Some(11), -20000, false),
            row(4, None, -200000, true),
            row(5, None, 200000, true),
            row(6, None, 100000, false),
        ]
    }

    #[test]
    fn test_totals_exclude_uncategorized_rows() {
        let t = totals(&ledger());
        assert_eq!(t.income, Money::from(5000000));
        assert_eq!(t.expense, Money::from(50000));
        assert_eq!(t.net(), Money::from(4950000));
    }

    #[test]
    fn test_transfer_totals_only_count_transfer_legs() {
        let t = transfer_totals(&ledger());
        assert_eq!(t.outgoing, Money::from(200000));
        assert_eq!(t.incoming, Money::from(200000));
    }

    #[test]
    fn test_empty_totals() {
        let none: Vec<Transaction> = Vec::new();
        assert_eq!(totals(&none), Totals::default());
        assert_eq!(transfer_totals(&none), TransferTotals::default());
    }

    #[test]
    fn test_total_balance() {
        let mut cash = Wallet::new(WalletId::from_raw(1), "Cash", WalletType::Cash);
        cash.balance = Money::from(70000);
        let mut bank = Wallet::new(WalletId::from_raw(2), "BCA", WalletType::Bank);
        bank.balance = Money::from(-5000);

        assert_eq!(total_balance(&[cash, bank]), Money::from(65000));
    }
}
