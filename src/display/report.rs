//! Report formatting for terminal output

use crate::models::Money;
use crate::reports::{CategoryShare, MonthlySummary, Totals, TransferTotals};

use super::width_of;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// A fixed-width bar for `value` out of `max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Dashboard: balance, income/expense and transfer figures
pub fn format_summary(
    total_balance: Money,
    totals: &Totals,
    transfers: &TransferTotals,
    symbol: &str,
) -> String {
    let rows = [
        ("Total balance", total_balance),
        ("Income", totals.income),
        ("Expense", totals.expense),
        ("Net", totals.net()),
        ("Transfers out", transfers.outgoing),
        ("Transfers in", transfers.incoming),
    ];

    let mut output = String::new();
    for (label, amount) in rows {
        output.push_str(&format!(
            "{:<14} {:>18}\n",
            label,
            amount.format_with_symbol(symbol)
        ));
    }
    output
}

/// Income and expense per month with bars scaled to the largest figure
pub fn format_monthly(months: &[MonthlySummary], symbol: &str) -> String {
    if months.is_empty() {
        return "No transactions found.".to_string();
    }

    let peak = months
        .iter()
        .flat_map(|m| [m.income.to_f64(), m.expense.to_f64()])
        .fold(0.0_f64, f64::max);

    let mut output = format!(
        "{:<8}  {:>16}  {:>16}  {}\n",
        "Month", "Income", "Expense", "Income / Expense"
    );
    for month in months {
        output.push_str(&format!(
            "{:<8}  {:>16}  {:>16}  {} / {}\n",
            month.month.label(),
            month.income.format_with_symbol(symbol),
            month.expense.format_with_symbol(symbol),
            format_bar(month.income.to_f64(), peak, 12),
            format_bar(month.expense.to_f64(), peak, 12),
        ));
    }
    output
}

/// Spending distribution by category
pub fn format_category_shares(shares: &[CategoryShare], symbol: &str) -> String {
    if shares.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let name_width = width_of(shares.iter().map(|s| s.name.as_str()), "Category");

    let mut output = format!(
        "{:<name_width$}  {:>16}  {:>6}  {}\n",
        "Category", "Spent", "Share", "Color"
    );
    for share in shares {
        output.push_str(&format!(
            "{:<name_width$}  {:>16}  {:>6}  {} {}\n",
            share.name,
            share.total.format_with_symbol(symbol),
            format_percentage(share.percentage),
            share.color,
            format_bar(share.percentage, 100.0, 20),
        ));
    }
    output
}
