//! Spending by category
//!
//! Groups expense rows (negative, categorized) by category for the
//! distribution chart.

use std::collections::BTreeMap;

use crate::models::{Category, CategoryId, Money, Transaction, DEFAULT_CATEGORY_COLOR};

/// One slice of the category distribution
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category_id: CategoryId,
    pub name: String,
    pub color: String,
    /// Total spent, non-negative
    pub total: Money,
    /// Share of all spending, 0-100
    pub percentage: f64,
}

/// Magnitude of spending per category
pub fn by_category<'a, I>(transactions: I) -> BTreeMap<CategoryId, Money>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut spending = BTreeMap::new();
    for txn in transactions.into_iter().filter(|t| t.is_outflow()) {
        if let Some(category_id) = txn.category_id {
            *spending.entry(category_id).or_insert_with(Money::zero) += txn.amount.abs();
        }
    }
    spending
}

/// Spending per category with names, colors and shares, largest first
pub fn category_breakdown(categories: &[Category], transactions: &[Transaction]) -> Vec<CategoryShare> {
    let spending = by_category(transactions);
    let grand_total: Money = spending.values().sum();

    let mut shares: Vec<CategoryShare> = spending
        .into_iter()
        .map(|(category_id, total)| {
            let category = categories.iter().find(|c| c.id == category_id);
            CategoryShare {
                category_id,
                name: category.map_or_else(|| "Unknown Category".to_string(), |c| c.name.clone()),
                color: category
                    .map_or_else(|| DEFAULT_CATEGORY_COLOR.to_string(), |c| c.color.clone()),
                total,
                percentage: total.percent_of(grand_total),
            }
        })
        .collect();

    shares.sort_by(|a, b| b.total.cmp(&a.total).then(a.name.cmp(&b.name)));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, TransactionId, WalletId};
    use chrono::NaiveDate;

    fn row(id: u64, category: Option<u64>, amount: i64) -> Transaction {
        let mut txn = Transaction::new(
            TransactionId::from_raw(id),
            WalletId::from_raw(1),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            Money::from(amount),
        );
        txn.category_id = category.map(CategoryId::from_raw);
        txn
    }

    #[test]
    fn test_by_category_only_counts_categorized_outflows() {
        let txns = vec![
            row(1, Some(10), -30000),
            row(2, Some(10), -20000),
            row(3, Some(11), -5000),
            row(4, Some(12), 900000),
            row(5, None, -200000),
        ];

        let spending = by_category(&txns);
        assert_eq!(spending.len(), 2);
        assert_eq!(spending[&CategoryId::from_raw(10)], Money::from(50000));
        assert_eq!(spending[&CategoryId::from_raw(11)], Money::from(5000));
    }

    #[test]
    fn test_breakdown_shares() {
        let food = Category::new(CategoryId::from_raw(10), "Food", CategoryType::Expense);
        let transport = Category::new(CategoryId::from_raw(11), "Transport", CategoryType::Expense);
        let txns = vec![row(1, Some(10), -75000), row(2, Some(11), -25000)];

        let shares = category_breakdown(&[transport, food], &txns);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].name, "Food");
        assert!((shares[0].percentage - 75.0).abs() < f64::EPSILON);
        assert_eq!(shares[1].name, "Transport");
    }

    #[test]
    fn test_breakdown_empty() {
        assert!(category_breakdown(&[], &[]).is_empty());
    }
}
