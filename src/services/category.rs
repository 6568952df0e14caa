//! Category service
//!
//! Category CRUD. Deleting a category removes its transactions and reverses
//! each one on the wallet that holds it.

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryId, CategoryType, Money, Transaction};
use crate::storage::{Collection, Storage};

/// Input for a new category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub category_type: CategoryType,
    pub budget: Option<Money>,
    /// Chart color; the default color when `None`
    pub color: Option<String>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, category_type: CategoryType) -> Self {
        Self {
            name: name.into(),
            category_type,
            budget: None,
            color: None,
        }
    }

    pub fn budget(mut self, budget: Money) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Fields of a category that can be edited
///
/// `budget: Some(None)` clears the budget.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub category_type: Option<CategoryType>,
    pub budget: Option<Option<Money>>,
    pub color: Option<String>,
}

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a mut Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&mut self, input: NewCategory) -> LedgerResult<Category> {
        let mut next = self.storage.snapshot();

        let mut category = Category::new(
            self.storage.ids().category(),
            input.name.trim(),
            input.category_type,
        );
        category.budget = input.budget;
        if let Some(color) = input.color {
            category.color = color;
        }
        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        next.categories.push(category.clone());
        self.storage.commit(next, &[Collection::Categories])?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        );

        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.storage.data().category(id)
    }

    /// Find a category by name (case-insensitive) or id
    pub fn find(&self, identifier: &str) -> Option<&Category> {
        self.storage.data().find_category(identifier)
    }

    pub fn list(&self) -> &[Category] {
        self.storage.categories()
    }

    pub fn list_by_type(&self, category_type: CategoryType) -> Vec<&Category> {
        self.storage
            .categories()
            .iter()
            .filter(|c| c.category_type == category_type)
            .collect()
    }

    /// Edit a category
    ///
    /// The type cannot change while transactions are recorded against the
    /// category, since their signs follow the type.
    pub fn update(&mut self, id: CategoryId, patch: CategoryPatch) -> LedgerResult<Category> {
        let mut next = self.storage.snapshot();
        let before = next
            .category(id)
            .cloned()
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))?;

        if let Some(new_type) = patch.category_type {
            let in_use = next.transactions.iter().any(|t| t.category_id == Some(id));
            if new_type != before.category_type && in_use {
                return Err(LedgerError::Validation(format!(
                    "Cannot change the type of '{}' while it has transactions",
                    before.name
                )));
            }
        }

        let category = next
            .category_mut(id)
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))?;
        if let Some(name) = patch.name {
            category.name = name.trim().to_string();
        }
        if let Some(category_type) = patch.category_type {
            category.category_type = category_type;
        }
        if let Some(budget) = patch.budget {
            category.budget = budget;
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        let after = category.clone();

        self.storage.commit(next, &[Collection::Categories])?;
        self.storage.log_update(
            EntityType::Category,
            id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
        );

        Ok(after)
    }

    /// Set or clear the budget ceiling
    pub fn set_budget(&mut self, id: CategoryId, budget: Option<Money>) -> LedgerResult<Category> {
        self.update(
            id,
            CategoryPatch {
                budget: Some(budget),
                ..Default::default()
            },
        )
    }

    /// Delete a category and its transactions
    pub fn delete(&mut self, id: CategoryId) -> LedgerResult<(Category, Vec<Transaction>)> {
        let mut next = self.storage.snapshot();
        let category = next
            .category(id)
            .cloned()
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))?;

        let (removed, kept): (Vec<Transaction>, Vec<Transaction>) = next
            .transactions
            .into_iter()
            .partition(|t| t.category_id == Some(id));
        next.transactions = kept;
        for txn in &removed {
            next.apply_to_wallet(txn.wallet_id, -txn.amount)?;
        }
        next.categories.retain(|c| c.id != id);

        self.storage.commit(
            next,
            &[
                Collection::Wallets,
                Collection::Categories,
                Collection::Transactions,
            ],
        )?;

        for txn in &removed {
            self.storage.log_delete(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.note.clone()),
                txn,
            );
        }
        self.storage.log_delete(
            EntityType::Category,
            id.to_string(),
            Some(category.name.clone()),
            &category,
        );

        Ok((category, removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WalletId, WalletType, DEFAULT_CATEGORY_COLOR};
    use crate::services::{CreateTransactionInput, TransactionService, WalletService};
    use chrono::NaiveDate;

    fn spend(storage: &mut Storage, wallet: WalletId, category: CategoryId, amount: i64) {
        TransactionService::new(storage)
            .create(CreateTransactionInput {
                wallet_id: Some(wallet),
                category_id: Some(category),
                amount: Some(Money::from(amount)),
                date: NaiveDate::from_ymd_opt(2025, 3, 1),
                note: String::new(),
            })
            .unwrap();
    }

    #[test]
    fn test_create_category_defaults() {
        let mut storage = Storage::in_memory();
        let category = CategoryService::new(&mut storage)
            .create(NewCategory::new("  Food ", CategoryType::Expense))
            .unwrap();

        assert_eq!(category.name, "Food");
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
        assert!(category.budget.is_none());
    }

    #[test]
    fn test_create_rejects_blank_name_and_negative_budget() {
        let mut storage = Storage::in_memory();
        let mut service = CategoryService::new(&mut storage);

        let blank = service.create(NewCategory::new("", CategoryType::Income));
        assert!(blank.unwrap_err().is_validation());

        let negative = service
            .create(NewCategory::new("Food", CategoryType::Expense).budget(Money::from(-1)));
        assert!(negative.unwrap_err().is_validation());
        assert!(service.list().is_empty());
    }

    #[test]
    fn test_set_and_clear_budget() {
        let mut storage = Storage::in_memory();
        let mut service = CategoryService::new(&mut storage);
        let category = service
            .create(NewCategory::new("Food", CategoryType::Expense).color("#FF3B30"))
            .unwrap();

        let with_budget = service
            .set_budget(category.id, Some(Money::from(500000)))
            .unwrap();
        assert_eq!(with_budget.budget, Some(Money::from(500000)));

        let cleared = service.set_budget(category.id, None).unwrap();
        assert!(cleared.budget.is_none());
        assert_eq!(cleared.color, "#FF3B30");
    }

    #[test]
    fn test_type_change_blocked_while_in_use() {
        let mut storage = Storage::in_memory();
        let wallet = WalletService::new(&mut storage)
            .create("Cash", WalletType::Cash, Money::from(10000))
            .unwrap()
            .id;
        let category = CategoryService::new(&mut storage)
            .create(NewCategory::new("Misc", CategoryType::Expense))
            .unwrap()
            .id;

        let patch = CategoryPatch {
            category_type: Some(CategoryType::Income),
            ..Default::default()
        };
        spend(&mut storage, wallet, category, 1000);

        let result = CategoryService::new(&mut storage).update(category, patch);
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_delete_reverses_each_transaction() {
        let mut storage = Storage::in_memory();
        let wallet = WalletService::new(&mut storage)
            .create("Cash", WalletType::Cash, Money::from(10000))
            .unwrap()
            .id;
        let mut service = CategoryService::new(&mut storage);
        let food = service
            .create(NewCategory::new("Food", CategoryType::Expense))
            .unwrap()
            .id;
        let list_by_type = service.list_by_type(CategoryType::Expense).len();
        assert_eq!(list_by_type, 1);

        spend(&mut storage, wallet, food, 1000);
        spend(&mut storage, wallet, food, 2000);
        assert_eq!(storage.data().wallet(wallet).unwrap().balance, Money::from(7000));

        let (_, removed) = CategoryService::new(&mut storage).delete(food).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(storage.data().wallet(wallet).unwrap().balance, Money::from(10000));
        assert!(storage.categories().is_empty());
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let mut storage = Storage::in_memory();
        let result = CategoryService::new(&mut storage).delete(CategoryId::from_raw(3));
        assert!(result.unwrap_err().is_not_found());
    }
}
