//! Maintenance service
//!
//! Bulk resets and consistency checks over the whole ledger.

use crate::audit::{AuditEntry, Operation};
use crate::error::LedgerResult;
use crate::models::{Money, TransactionId, WalletId};
use crate::storage::{Collection, LedgerData, Storage};

/// A wallet whose cached balance disagrees with its transactions
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceMismatch {
    pub wallet_id: WalletId,
    pub wallet_name: String,
    pub cached: Money,
    pub computed: Money,
}

impl BalanceMismatch {
    pub fn difference(&self) -> Money {
        self.cached - self.computed
    }
}

/// Result of an integrity check
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrityReport {
    pub mismatches: Vec<BalanceMismatch>,
    /// Transactions pointing at a wallet or category that no longer exists
    pub orphans: Vec<TransactionId>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty() && self.orphans.is_empty()
    }
}

/// Service for whole-ledger maintenance
pub struct MaintenanceService<'a> {
    storage: &'a mut Storage,
}

impl<'a> MaintenanceService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Remove every transaction and zero every wallet balance
    ///
    /// Wallets and categories are kept. Returns the number of transactions
    /// removed.
    pub fn reset_transactions(&mut self) -> LedgerResult<usize> {
        let mut next = self.storage.snapshot();
        let removed = next.transactions.len();
        next.transactions.clear();
        for wallet in &mut next.wallets {
            wallet.balance = Money::zero();
        }

        self.storage
            .commit(next, &[Collection::Wallets, Collection::Transactions])?;
        self.storage.log_entry(&AuditEntry::ledger(
            Operation::Reset,
            format!("removed {} transactions", removed),
        ));

        Ok(removed)
    }

    /// Remove all wallets, categories and transactions
    pub fn reset_all(&mut self) -> LedgerResult<()> {
        let before = self.storage.snapshot();
        self.storage.commit(LedgerData::default(), &Collection::ALL)?;
        self.storage.log_entry(&AuditEntry::ledger(
            Operation::Reset,
            format!(
                "removed {} wallets, {} categories, {} transactions",
                before.wallets.len(),
                before.categories.len(),
                before.transactions.len()
            ),
        ));
        Ok(())
    }

    /// Compare every cached balance with the sum of its transactions
    pub fn check_integrity(&self) -> IntegrityReport {
        let data = self.storage.data();

        let mismatches = find_mismatches(data);
        let orphans = data
            .transactions
            .iter()
            .filter(|t| {
                data.wallet(t.wallet_id).is_none()
                    || t.category_id.is_some_and(|c| data.category(c).is_none())
            })
            .map(|t| t.id)
            .collect();

        IntegrityReport {
            mismatches,
            orphans,
        }
    }

    /// Reset every cached balance to the sum of its transactions
    ///
    /// Returns the mismatches that were corrected.
    pub fn rebuild_balances(&mut self) -> LedgerResult<Vec<BalanceMismatch>> {
        let mut next = self.storage.snapshot();
        let mismatches = find_mismatches(&next);
        if mismatches.is_empty() {
            return Ok(mismatches);
        }

        for mismatch in &mismatches {
            if let Some(wallet) = next.wallet_mut(mismatch.wallet_id) {
                wallet.balance = mismatch.computed;
            }
        }

        self.storage.commit(next, &[Collection::Wallets])?;
        self.storage.log_entry(&AuditEntry::ledger(
            Operation::Update,
            format!("rebuilt {} wallet balances", mismatches.len()),
        ));

        Ok(mismatches)
    }
}

fn find_mismatches(data: &LedgerData) -> Vec<BalanceMismatch> {
    data.wallets
        .iter()
        .filter_map(|wallet| {
            let computed = data.computed_balance(wallet.id);
            (computed != wallet.balance).then(|| BalanceMismatch {
                wallet_id: wallet.id,
                wallet_name: wallet.name.clone(),
                cached: wallet.balance,
                computed,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, WalletType};
    use crate::services::{CategoryService, NewCategory, WalletService};

    fn seeded() -> Storage {
        let mut storage = Storage::in_memory();
        WalletService::new(&mut storage)
            .create("Cash", WalletType::Cash, Money::from(100000))
            .unwrap();
        WalletService::new(&mut storage)
            .create("BCA", WalletType::Bank, Money::from(50000))
            .unwrap();
        CategoryService::new(&mut storage)
            .create(NewCategory::new("Food", CategoryType::Expense))
            .unwrap();
        storage
    }

    #[test]
    fn test_reset_transactions_keeps_wallets_and_categories() {
        let mut storage = seeded();
        let removed = MaintenanceService::new(&mut storage)
            .reset_transactions()
            .unwrap();

        assert_eq!(removed, 2);
        assert!(storage.transactions().is_empty());
        assert_eq!(storage.wallets().len(), 2);
        assert!(storage.wallets().iter().all(|w| w.balance.is_zero()));
        assert_eq!(storage.categories().len(), 1);
    }

    #[test]
    fn test_reset_all() {
        let mut storage = seeded();
        MaintenanceService::new(&mut storage).reset_all().unwrap();
        assert_eq!(storage.data(), &LedgerData::default());
    }

    #[test]
    fn test_check_and_rebuild() {
        let mut storage = seeded();
        assert!(MaintenanceService::new(&mut storage)
            .check_integrity()
            .is_clean());

        let mut next = storage.snapshot();
        next.wallets[0].balance = Money::from(1);
        storage.commit(next, &[Collection::Wallets]).unwrap();

        let mut service = MaintenanceService::new(&mut storage);
        let report = service.check_integrity();
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.mismatches[0].difference(), Money::from(-99999));

        let fixed = service.rebuild_balances().unwrap();
        assert_eq!(fixed.len(), 1);
        assert!(service.check_integrity().is_clean());
    }
}
