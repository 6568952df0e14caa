//! Per-category budget usage

use crate::models::{Category, Money, Transaction};

/// How much of a category's budget has been used
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetUsage {
    /// Sum of |amount| over the category's transactions
    pub used: Money,
    pub budget: Option<Money>,
    /// `budget - used`; negative when over budget, `None` without a budget
    pub remaining: Option<Money>,
    /// `used / budget * 100`; 0 when the budget is missing or zero
    pub percentage: f64,
}

impl BudgetUsage {
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_some_and(|r| r.is_negative())
    }
}

pub fn budget_usage<'a, I>(category: &Category, transactions: I) -> BudgetUsage
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let used: Money = transactions
        .into_iter()
        .filter(|t| t.category_id == Some(category.id))
        .map(|t| t.amount.abs())
        .sum();

    let percentage = match category.budget {
        Some(budget) if !budget.is_zero() => used.percent_of(budget),
        _ => 0.0,
    };

    BudgetUsage {
        used,
        budget: category.budget,
        remaining: category.budget.map(|b| b - used),
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType, TransactionId, WalletId};
    use chrono::NaiveDate;

    fn spend(id: u64, category: &Category, amount: i64) -> Transaction {
        Transaction::categorized(
            TransactionId::from_raw(id),
            WalletId::from_raw(1),
            category.id,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            Money::from(amount),
            "",
        )
    }

    #[test]
    fn test_usage_against_budget() {
        let food = Category::new(CategoryId::from_raw(2), "Food", CategoryType::Expense)
            .with_budget(Money::from(500000));
        let other = Category::new(CategoryId::from_raw(3), "Fun", CategoryType::Expense);
        let txns = vec![
            spend(1, &food, -100000),
            spend(2, &food, -25000),
            spend(3, &other, -999),
        ];

        let usage = budget_usage(&food, &txns);
        assert_eq!(usage.used, Money::from(125000));
        assert_eq!(usage.remaining, Some(Money::from(375000)));
        assert!((usage.percentage - 25.0).abs() < f64::EPSILON);
        assert!(!usage.is_over_budget());
    }

    #[test]
    fn test_over_budget() {
        let food = Category::new(CategoryId::from_raw(2), "Food", CategoryType::Expense)
            .with_budget(Money::from(1000));
        let usage = budget_usage(&food, &[spend(1, &food, -1500)]);

        assert_eq!(usage.remaining, Some(Money::from(-500)));
        assert!(usage.is_over_budget());
        assert!((usage.percentage - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_null_budget_never_divides() {
        let food = Category::new(CategoryId::from_raw(2), "Food", CategoryType::Expense);
        let usage = budget_usage(&food, &[spend(1, &food, -1500)]);

        assert_eq!(usage.used, Money::from(1500));
        assert_eq!(usage.remaining, None);
        assert_eq!(usage.percentage, 0.0);
        assert!(usage.percentage.is_finite());
    }

    #[test]
    fn test_zero_budget_never_divides() {
        let food = Category::new(CategoryId::from_raw(2), "Food", CategoryType::Expense)
            .with_budget(Money::zero());
        let usage = budget_usage(&food, &[spend(1, &food, -1500)]);

        assert_eq!(usage.percentage, 0.0);
        assert_eq!(usage.remaining, Some(Money::from(-1500)));
    }
}
