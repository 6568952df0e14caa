//! Wallet service
//!
//! Wallet CRUD plus the two ways a wallet's balance is set by hand: the
//! opening balance at creation and later balance adjustments. Both are
//! recorded as uncategorized transactions so the cached balance always
//! equals the sum of the wallet's transactions.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Money, Transaction, Wallet, WalletId, WalletType, ADJUSTMENT_NOTE, OPENING_BALANCE_NOTE,
};
use crate::storage::{Collection, LedgerData, Storage};

use super::today;

/// Fields of a wallet that can be edited
#[derive(Debug, Clone, Default)]
pub struct WalletPatch {
    pub name: Option<String>,
    pub wallet_type: Option<WalletType>,
}

/// Service for wallet management
pub struct WalletService<'a> {
    storage: &'a mut Storage,
}

impl<'a> WalletService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Create a wallet dated today
    pub fn create(
        &mut self,
        name: &str,
        wallet_type: WalletType,
        opening_balance: Money,
    ) -> LedgerResult<Wallet> {
        self.create_on(name, wallet_type, opening_balance, today())
    }

    /// Create a wallet whose opening balance is recorded on `date`
    pub fn create_on(
        &mut self,
        name: &str,
        wallet_type: WalletType,
        opening_balance: Money,
        date: NaiveDate,
    ) -> LedgerResult<Wallet> {
        let name = name.trim();
        let mut next = self.storage.snapshot();
        ensure_unique_name(&next, name, None)?;

        let wallet_id = self.storage.ids().wallet();
        let wallet = Wallet::new(wallet_id, name, wallet_type);
        wallet
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        next.wallets.push(wallet);

        let opening = if opening_balance.is_zero() {
            None
        } else {
            let mut txn = Transaction::new(
                self.storage.ids().transaction(),
                wallet_id,
                date,
                opening_balance,
            );
            txn.note = OPENING_BALANCE_NOTE.to_string();
            next.apply_to_wallet(wallet_id, opening_balance)?;
            next.transactions.push(txn.clone());
            Some(txn)
        };

        let created = next
            .wallet(wallet_id)
            .cloned()
            .ok_or_else(|| LedgerError::wallet_not_found(wallet_id.to_string()))?;

        let touched: &[Collection] = if opening.is_some() {
            &[Collection::Wallets, Collection::Transactions]
        } else {
            &[Collection::Wallets]
        };
        self.storage.commit(next, touched)?;

        self.storage.log_create(
            EntityType::Wallet,
            created.id.to_string(),
            Some(created.name.clone()),
            &created,
        );
        if let Some(txn) = &opening {
            self.storage.log_create(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.note.clone()),
                txn,
            );
        }

        Ok(created)
    }

    pub fn get(&self, id: WalletId) -> Option<&Wallet> {
        self.storage.data().wallet(id)
    }

    /// Find a wallet by name (case-insensitive) or id
    pub fn find(&self, identifier: &str) -> Option<&Wallet> {
        self.storage.data().find_wallet(identifier)
    }

    pub fn list(&self) -> &[Wallet] {
        self.storage.wallets()
    }

    /// Sum of every wallet balance
    pub fn total_balance(&self) -> Money {
        self.storage.wallets().iter().map(|w| w.balance).sum()
    }

    /// Rename a wallet or change its type
    pub fn update(&mut self, id: WalletId, patch: WalletPatch) -> LedgerResult<Wallet> {
        let mut next = self.storage.snapshot();
        let before = next
            .wallet(id)
            .cloned()
            .ok_or_else(|| LedgerError::wallet_not_found(id.to_string()))?;

        if let Some(name) = &patch.name {
            ensure_unique_name(&next, name.trim(), Some(id))?;
        }

        let wallet = next
            .wallet_mut(id)
            .ok_or_else(|| LedgerError::wallet_not_found(id.to_string()))?;
        if let Some(name) = patch.name {
            wallet.name = name.trim().to_string();
        }
        if let Some(wallet_type) = patch.wallet_type {
            wallet.wallet_type = wallet_type;
        }
        wallet
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        let after = wallet.clone();

        self.storage.commit(next, &[Collection::Wallets])?;
        self.storage.log_update(
            EntityType::Wallet,
            id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
        );

        Ok(after)
    }

    /// Bring a wallet's balance to `target` with an adjustment transaction
    ///
    /// Returns `None` when the balance already equals `target`.
    pub fn adjust_balance(
        &mut self,
        id: WalletId,
        target: Money,
        date: NaiveDate,
    ) -> LedgerResult<Option<Transaction>> {
        let mut next = self.storage.snapshot();
        let wallet = next
            .wallet(id)
            .cloned()
            .ok_or_else(|| LedgerError::wallet_not_found(id.to_string()))?;

        let difference = target.checked_sub(wallet.balance).ok_or_else(|| {
            LedgerError::Validation(format!("Cannot adjust {} to {}", wallet.name, target))
        })?;
        if difference.is_zero() {
            return Ok(None);
        }

        let mut txn = Transaction::new(self.storage.ids().transaction(), id, date, difference);
        txn.note = ADJUSTMENT_NOTE.to_string();
        next.apply_to_wallet(id, difference)?;
        next.transactions.push(txn.clone());

        self.storage
            .commit(next, &[Collection::Wallets, Collection::Transactions])?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(format!("{} ({})", ADJUSTMENT_NOTE, wallet.name)),
            &txn,
        );

        Ok(Some(txn))
    }

    /// Delete a wallet and every transaction recorded against it
    pub fn delete(&mut self, id: WalletId) -> LedgerResult<(Wallet, Vec<Transaction>)> {
        let mut next = self.storage.snapshot();
        let wallet = next
            .wallet(id)
            .cloned()
            .ok_or_else(|| LedgerError::wallet_not_found(id.to_string()))?;

        let (removed, kept): (Vec<Transaction>, Vec<Transaction>) = next
            .transactions
            .into_iter()
            .partition(|t| t.wallet_id == id);
        next.transactions = kept;
        next.wallets.retain(|w| w.id != id);

        self.storage
            .commit(next, &[Collection::Wallets, Collection::Transactions])?;

        for txn in &removed {
            self.storage.log_delete(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.note.clone()),
                txn,
            );
        }
        self.storage.log_delete(
            EntityType::Wallet,
            id.to_string(),
            Some(wallet.name.clone()),
            &wallet,
        );

        Ok((wallet, removed))
    }
}

fn ensure_unique_name(data: &LedgerData, name: &str, except: Option<WalletId>) -> LedgerResult<()> {
    let taken = data
        .wallets
        .iter()
        .any(|w| Some(w.id) != except && w.name.eq_ignore_ascii_case(name));

    if taken {
        return Err(LedgerError::Duplicate {
            entity_type: "Wallet",
            identifier: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryType};
    use crate::services::{CreateTransactionInput, TransactionService};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_create_wallet_without_opening_balance() {
        let mut storage = Storage::in_memory();
        let wallet = WalletService::new(&mut storage)
            .create("Dompet", WalletType::Cash, Money::zero())
            .unwrap();

        assert_eq!(wallet.name, "Dompet");
        assert!(wallet.balance.is_zero());
        assert!(storage.transactions().is_empty());
    }

    #[test]
    fn test_opening_balance_is_recorded_as_transaction() {
        let mut storage = Storage::in_memory();
        let wallet = WalletService::new(&mut storage)
            .create_on("BCA", WalletType::Bank, Money::from(100000), date())
            .unwrap();

        assert_eq!(wallet.balance, Money::from(100000));
        let txns = storage.transactions();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, Money::from(100000));
        assert_eq!(txns[0].note, OPENING_BALANCE_NOTE);
        assert!(txns[0].category_id.is_none());
        assert!(!txns[0].is_transfer);
    }

    #[test]
    fn test_duplicate_and_blank_names_rejected() {
        let mut storage = Storage::in_memory();
        let mut service = WalletService::new(&mut storage);
        service
            .create("Cash", WalletType::Cash, Money::zero())
            .unwrap();

        let dup = service.create("cash", WalletType::Cash, Money::zero());
        assert!(matches!(dup, Err(LedgerError::Duplicate { .. })));

        let blank = service.create("   ", WalletType::Cash, Money::zero());
        assert!(blank.unwrap_err().is_validation());
    }

    #[test]
    fn test_find_by_name_or_id() {
        let mut storage = Storage::in_memory();
        let mut service = WalletService::new(&mut storage);
        let wallet = service
            .create("GoPay", WalletType::Ewallet, Money::zero())
            .unwrap();

        assert_eq!(service.find("gopay").map(|w| w.id), Some(wallet.id));
        assert_eq!(
            service.find(&wallet.id.to_string()).map(|w| w.id),
            Some(wallet.id)
        );
        assert!(service.find("OVO").is_none());
    }

    #[test]
    fn test_update_wallet() {
        let mut storage = Storage::in_memory();
        let mut service = WalletService::new(&mut storage);
        let wallet = service
            .create("Dompet", WalletType::Cash, Money::from(5000))
            .unwrap();

        let updated = service
            .update(
                wallet.id,
                WalletPatch {
                    name: Some("Mandiri".into()),
                    wallet_type: Some(WalletType::Bank),
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Mandiri");
        assert_eq!(updated.wallet_type, WalletType::Bank);
        assert_eq!(updated.balance, Money::from(5000));
    }

    #[test]
    fn test_adjust_balance() {
        let mut storage = Storage::in_memory();
        let mut service = WalletService::new(&mut storage);
        let wallet = service
            .create("Cash", WalletType::Cash, Money::from(50000))
            .unwrap();

        let adjustment = service
            .adjust_balance(wallet.id, Money::from(45000), date())
            .unwrap()
            .unwrap();
        assert_eq!(adjustment.amount, Money::from(-5000));
        assert_eq!(adjustment.note, ADJUSTMENT_NOTE);
        assert_eq!(service.get(wallet.id).unwrap().balance, Money::from(45000));

        let unchanged = service
            .adjust_balance(wallet.id, Money::from(45000), date())
            .unwrap();
        assert!(unchanged.is_none());
    }

    #[test]
    fn test_delete_cascades_to_transactions() {
        let mut storage = Storage::in_memory();
        let cash = WalletService::new(&mut storage)
            .create("Cash", WalletType::Cash, Money::from(100000))
            .unwrap();
        let bank = WalletService::new(&mut storage)
            .create("Bank", WalletType::Bank, Money::from(200000))
            .unwrap();

        let mut next = storage.snapshot();
        let food = Category::new(storage.ids().category(), "Food", CategoryType::Expense);
        next.categories.push(food.clone());
        storage.commit(next, &[Collection::Categories]).unwrap();

        TransactionService::new(&mut storage)
            .create(CreateTransactionInput {
                wallet_id: Some(cash.id),
                category_id: Some(food.id),
                amount: Some(Money::from(30000)),
                date: Some(date()),
                note: "lunch".into(),
            })
            .unwrap();

        let (_, removed) = WalletService::new(&mut storage).delete(cash.id).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(storage.transactions().iter().all(|t| t.wallet_id == bank.id));
        assert_eq!(storage.wallets().len(), 1);
    }

    #[test]
    fn test_opening_balance_out_of_range_is_rejected() {
        let mut storage = Storage::in_memory();
        let mut service = WalletService::new(&mut storage);
        let wallet = service
            .create("Vault", WalletType::Bank, Money::new(rust_decimal::Decimal::MAX))
            .unwrap();

        let result = service.adjust_balance(wallet.id, Money::new(rust_decimal::Decimal::MIN), date());
        assert!(result.unwrap_err().is_validation());
        assert_eq!(
            service.get(wallet.id).unwrap().balance,
            Money::new(rust_decimal::Decimal::MAX)
        );
    }

    #[test]
    fn test_total_balance() {
        let mut storage = Storage::in_memory();
        let mut service = WalletService::new(&mut storage);
        service
            .create("Cash", WalletType::Cash, Money::from(100000))
            .unwrap();
        service
            .create("BCA", WalletType::Bank, Money::from(250000))
            .unwrap();

        assert_eq!(service.total_balance(), Money::from(350000));
    }
}
