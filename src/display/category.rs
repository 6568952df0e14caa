//! Category display formatting

use crate::models::Category;
use crate::reports::BudgetUsage;

use super::report::{format_bar, format_percentage};
use super::width_of;

/// Categories with their budget usage, one row each
pub fn format_category_list(rows: &[(&Category, BudgetUsage)], symbol: &str) -> String {
    if rows.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = width_of(rows.iter().map(|(c, _)| c.name.as_str()), "Name");

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<7}  {:>16}  {:>16}  {:>7}  {}\n",
        "Name", "Type", "Used", "Budget", "Usage", "Color",
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<7}  {:->16}  {:->16}  {:->7}  {:-<7}\n",
        "", "", "", "", "", "",
    ));

    for (category, usage) in rows {
        let budget = usage
            .budget
            .map(|b| b.format_with_symbol(symbol))
            .unwrap_or_else(|| "-".to_string());
        let percent = if usage.budget.is_some() {
            format_percentage(usage.percentage)
        } else {
            "-".to_string()
        };

        output.push_str(&format!(
            "{:<name_width$}  {:<7}  {:>16}  {:>16}  {:>7}  {}\n",
            category.name,
            category.category_type.to_string(),
            usage.used.format_with_symbol(symbol),
            budget,
            percent,
            category.color,
        ));
    }

    output
}

/// Budget status for one category
pub fn format_budget_status(category: &Category, usage: &BudgetUsage, symbol: &str) -> String {
    let mut output = format!("{} ({})\n", category.name, category.category_type);
    output.push_str(&format!("  Used:      {}\n", usage.used.format_with_symbol(symbol)));

    match (usage.budget, usage.remaining) {
        (Some(budget), Some(remaining)) => {
            output.push_str(&format!("  Budget:    {}\n", budget.format_with_symbol(symbol)));
            output.push_str(&format!(
                "  Remaining: {}\n",
                remaining.format_with_symbol(symbol)
            ));
            output.push_str(&format!(
                "  [{}] {}\n",
                format_bar(usage.percentage.min(100.0), 100.0, 20),
                format_percentage(usage.percentage)
            ));
            if usage.is_over_budget() {
                output.push_str("  Over budget!\n");
            }
        }
        _ => output.push_str("  No budget set\n"),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType, Money};

    #[test]
    fn test_budget_status_over_budget() {
        let food = Category::new(CategoryId::from_raw(1), "Makan", CategoryType::Expense)
            .with_budget(Money::from(100000));
        let usage = BudgetUsage {
            used: Money::from(150000),
            budget: Some(Money::from(100000)),
            remaining: Some(Money::from(-50000)),
            percentage: 150.0,
        };

        let text = format_budget_status(&food, &usage, "Rp");
        assert!(text.contains("-Rp 50.000"));
        assert!(text.contains("150%"));
        assert!(text.contains("Over budget!"));
    }

    #[test]
    fn test_list_without_budget() {
        let gaji = Category::new(CategoryId::from_raw(1), "Gaji", CategoryType::Income);
        let usage = BudgetUsage {
            used: Money::from(5000000),
            budget: None,
            remaining: None,
            percentage: 0.0,
        };

        let text = format_category_list(&[(&gaji, usage)], "Rp");
        assert!(text.contains("Gaji"));
        assert!(text.contains("Income"));
        assert!(text.contains("Rp 5.000.000"));
    }
}
