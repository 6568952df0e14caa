//! Category CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_budget_status, format_category_list};
use crate::error::LedgerResult;
use crate::reports::budget_usage;
use crate::services::{CategoryPatch, CategoryService, NewCategory};
use crate::storage::Storage;

use super::{parse_category_type, parse_money, resolve_category};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Category type (income, expense)
        #[arg(short = 't', long, default_value = "expense")]
        category_type: String,
        /// Monthly budget ceiling
        #[arg(short, long)]
        budget: Option<String>,
        /// Chart color (e.g., "#FF9500")
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List categories with budget usage
    List {
        /// Only show one type (income, expense)
        #[arg(short = 't', long)]
        category_type: Option<String>,
    },
    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type
        #[arg(short = 't', long)]
        category_type: Option<String>,
        /// New color
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a category and all of its transactions
    Delete {
        /// Category name or ID
        category: String,
    },
    /// Show, set or clear a category's budget
    Budget {
        /// Category name or ID
        category: String,
        /// New budget amount
        amount: Option<String>,
        /// Remove the budget
        #[arg(long, conflicts_with = "amount")]
        clear: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CategoryCommands::Add {
            name,
            category_type,
            budget,
            color,
        } => {
            let mut input = NewCategory::new(name, parse_category_type(&category_type)?);
            if let Some(budget) = budget {
                input = input.budget(parse_money(&budget)?);
            }
            if let Some(color) = color {
                input = input.color(color);
            }

            let category = CategoryService::new(storage).create(input)?;
            println!("Created category: {}", category.name);
            println!("  Type: {}", category.category_type);
            if let Some(budget) = category.budget {
                println!("  Budget: {}", budget.format_with_symbol(symbol));
            }
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List { category_type } => {
            let filter = category_type
                .as_deref()
                .map(parse_category_type)
                .transpose()?;
            let data = storage.data();

            let rows: Vec<_> = data
                .categories
                .iter()
                .filter(|c| filter.map_or(true, |t| c.category_type == t))
                .map(|c| (c, budget_usage(c, &data.transactions)))
                .collect();

            print!("{}", format_category_list(&rows, symbol));
        }

        CategoryCommands::Edit {
            category,
            name,
            category_type,
            color,
        } => {
            if name.is_none() && category_type.is_none() && color.is_none() {
                println!("No changes specified. Use --name, --category-type or --color.");
                return Ok(());
            }

            let id = resolve_category(storage, &category)?;
            let patch = CategoryPatch {
                name,
                category_type: category_type
                    .as_deref()
                    .map(parse_category_type)
                    .transpose()?,
                budget: None,
                color,
            };

            let updated = CategoryService::new(storage).update(id, patch)?;
            println!(
                "Updated category: {} ({})",
                updated.name, updated.category_type
            );
        }

        CategoryCommands::Delete { category } => {
            let id = resolve_category(storage, &category)?;
            let (deleted, removed) = CategoryService::new(storage).delete(id)?;
            println!(
                "Deleted category: {} ({} transactions removed)",
                deleted.name,
                removed.len()
            );
        }

        CategoryCommands::Budget {
            category,
            amount,
            clear,
        } => {
            let id = resolve_category(storage, &category)?;

            if clear {
                let updated = CategoryService::new(storage).set_budget(id, None)?;
                println!("Cleared budget for {}", updated.name);
            } else if let Some(amount) = amount {
                let budget = parse_money(&amount)?;
                let updated = CategoryService::new(storage).set_budget(id, Some(budget))?;
                println!(
                    "Set budget for {} to {}",
                    updated.name,
                    budget.format_with_symbol(symbol)
                );
            }

            let data = storage.data();
            if let Some(found) = data.category(id) {
                let usage = budget_usage(found, &data.transactions);
                print!("{}", format_budget_status(found, &usage, symbol));
            }
        }
    }

    Ok(())
}
