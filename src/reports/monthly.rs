//! Income and expense per calendar month
//!
//! Buckets are keyed and ordered by (year, month), so December 2024 sorts
//! before January 2025. Every row counts, transfers included.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::models::{Money, Transaction};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Chart label, e.g. `Jan 2025`
    pub fn label(&self) -> String {
        let index = self.month.saturating_sub(1) as usize;
        let name = MONTH_ABBREVIATIONS.get(index).copied().unwrap_or("???");
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Totals for one month, both non-negative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub income: Money,
    pub expense: Money,
}

/// Monthly buckets in chronological order
pub fn by_month<'a, I>(transactions: I) -> Vec<MonthlySummary>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets: BTreeMap<MonthKey, MonthlySummary> = BTreeMap::new();

    for txn in transactions {
        let month = MonthKey::of(txn.date);
        let bucket = buckets.entry(month).or_insert(MonthlySummary {
            month,
            income: Money::zero(),
            expense: Money::zero(),
        });
        if txn.is_inflow() {
            bucket.income += txn.amount;
        } else {
            bucket.expense += txn.amount.abs();
        }
    }

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, WalletId};

    fn row(id: u64, y: i32, m: u32, amount: i64) -> Transaction {
        Transaction::new(
            TransactionId::from_raw(id),
            WalletId::from_raw(1),
            NaiveDate::from_ymd_opt(y, m, 10).unwrap(),
            Money::from(amount),
        )
    }

    #[test]
    fn test_ordered_across_year_boundary() {
        let txns = vec![
            row(1, 2025, 1, -100),
            row(2, 2024, 12, 500),
            row(3, 2024, 1, -50),
            row(4, 2025, 1, 300),
        ];

        let months = by_month(&txns);
        let labels: Vec<String> = months.iter().map(|m| m.month.label()).collect();
        assert_eq!(labels, vec!["Jan 2024", "Dec 2024", "Jan 2025"]);

        assert_eq!(months[2].income, Money::from(300));
        assert_eq!(months[2].expense, Money::from(100));
        assert_eq!(months[1].income, Money::from(500));
        assert!(months[1].expense.is_zero());
    }

    #[test]
    fn test_month_key_display() {
        let key = MonthKey::of(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        assert_eq!(key.to_string(), "2025-03");
        assert_eq!(key.label(), "Mar 2025");
    }

    #[test]
    fn test_empty() {
        let none: Vec<Transaction> = Vec::new();
        assert!(by_month(&none).is_empty());
    }
}
