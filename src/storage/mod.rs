//! Storage layer for Pocketbook
//!
//! The ledger lives in three JSON documents (`wallets`, `categories`,
//! `transactions`) inside a [`KeyValueStore`]. [`Storage`] loads them once,
//! hands out read access, and writes back whole collections when a service
//! commits a new state.

pub mod file_io;
pub mod kv;

pub use file_io::{write_json_atomic, write_text_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::config::{PocketbookPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Category, CategoryId, IdGenerator, Money, Transaction, TransactionId, Wallet, WalletId,
};

/// The persisted collections and their store keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Wallets,
    Categories,
    Transactions,
}

impl Collection {
    /// Every collection, in commit order
    pub const ALL: [Collection; 3] = [
        Collection::Wallets,
        Collection::Categories,
        Collection::Transactions,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Collection::Wallets => "wallets",
            Collection::Categories => "categories",
            Collection::Transactions => "transactions",
        }
    }
}

/// The full ledger state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerData {
    pub wallets: Vec<Wallet>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
}

impl LedgerData {
    pub fn wallet(&self, id: WalletId) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == id)
    }

    pub fn wallet_mut(&mut self, id: WalletId) -> Option<&mut Wallet> {
        self.wallets.iter_mut().find(|w| w.id == id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    /// Find a wallet by name (case-insensitive) or id
    pub fn find_wallet(&self, identifier: &str) -> Option<&Wallet> {
        let needle = identifier.trim();
        self.wallets
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(needle))
            .or_else(|| self.wallet(needle.parse().ok()?))
    }

    /// Find a category by name (case-insensitive) or id
    pub fn find_category(&self, identifier: &str) -> Option<&Category> {
        let needle = identifier.trim();
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(needle))
            .or_else(|| self.category(needle.parse().ok()?))
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn transaction_mut(&mut self, id: TransactionId) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|t| t.id == id)
    }

    /// Add `amount` to a wallet's cached balance
    ///
    /// Returns `Ok(false)` when the wallet does not exist, and a validation
    /// error when the new balance would leave the representable range.
    pub fn apply_to_wallet(&mut self, id: WalletId, amount: Money) -> LedgerResult<bool> {
        let Some(wallet) = self.wallet_mut(id) else {
            return Ok(false);
        };
        wallet.balance = wallet.balance.checked_add(amount).ok_or_else(|| {
            LedgerError::Validation(format!(
                "Amount {} would overflow the balance of {}",
                amount, wallet.name
            ))
        })?;
        Ok(true)
    }

    /// Sum of every transaction recorded against a wallet
    pub fn computed_balance(&self, id: WalletId) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.wallet_id == id)
            .map(|t| t.amount)
            .sum()
    }

    /// Largest id used by any entity
    pub fn max_id(&self) -> u64 {
        let wallets = self.wallets.iter().map(|w| w.id.value());
        let categories = self.categories.iter().map(|c| c.id.value());
        let transactions = self.transactions.iter().map(|t| t.id.value());
        wallets.chain(categories).chain(transactions).max().unwrap_or(0)
    }

    fn encode(&self, collection: Collection) -> LedgerResult<String> {
        let encoded = match collection {
            Collection::Wallets => serde_json::to_string(&self.wallets),
            Collection::Categories => serde_json::to_string(&self.categories),
            Collection::Transactions => serde_json::to_string(&self.transactions),
        };
        encoded.map_err(|e| {
            LedgerError::Storage(format!("Failed to serialize {}: {}", collection.key(), e))
        })
    }
}

/// Entity repository over a key-value store
pub struct Storage {
    store: Box<dyn KeyValueStore>,
    data: LedgerData,
    ids: IdGenerator,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Load all collections from `store`
    pub fn open(store: Box<dyn KeyValueStore>) -> LedgerResult<Self> {
        let data = Self::open_data(store.as_ref())?;

        debug!(
            wallets = data.wallets.len(),
            categories = data.categories.len(),
            transactions = data.transactions.len(),
            "Loaded ledger"
        );

        Ok(Self {
            ids: IdGenerator::seeded(data.max_id()),
            store,
            data,
            audit: None,
        })
    }

    /// Open the file-backed ledger under the configured data directory
    pub fn from_paths(paths: &PocketbookPaths, settings: &Settings) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        let storage = Self::open(Box::new(FileStore::new(paths.data_dir())))?;
        if settings.audit_enabled {
            Ok(storage.with_audit(AuditLogger::new(paths.audit_log())))
        } else {
            Ok(storage)
        }
    }

    /// An empty ledger backed by a fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self {
            store: Box::new(MemoryStore::new()),
            data: LedgerData::default(),
            ids: IdGenerator::default(),
            audit: None,
        }
    }

    /// Append every mutation to `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn data(&self) -> &LedgerData {
        &self.data
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.data.wallets
    }

    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.data.transactions
    }

    /// A copy of the current state for a service to mutate
    pub fn snapshot(&self) -> LedgerData {
        self.data.clone()
    }

    pub fn ids(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Re-read every collection from the store
    pub fn reload(&mut self) -> LedgerResult<()> {
        let reloaded = Self::open_data(self.store.as_ref())?;
        self.ids.observe(reloaded.max_id());
        self.data = reloaded;
        Ok(())
    }

    fn open_data(store: &dyn KeyValueStore) -> LedgerResult<LedgerData> {
        Ok(LedgerData {
            wallets: load_collection(store, Collection::Wallets)?,
            categories: load_collection(store, Collection::Categories)?,
            transactions: load_collection(store, Collection::Transactions)?,
        })
    }

    /// Persist `next` and make it the current state
    ///
    /// Only the `touched` collections are written, in the given order. If a
    /// write fails, the collections already written are restored from the
    /// current state and the in-memory state is left untouched.
    pub fn commit(&mut self, next: LedgerData, touched: &[Collection]) -> LedgerResult<()> {
        let mut written: Vec<Collection> = Vec::with_capacity(touched.len());

        for &collection in touched {
            let contents = next.encode(collection)?;
            if let Err(err) = self.store.set(collection.key(), &contents) {
                self.restore(&written);
                return Err(match err {
                    LedgerError::Storage(msg) => LedgerError::Storage(msg),
                    other => LedgerError::Storage(format!(
                        "Failed to write {}: {}",
                        collection.key(),
                        other
                    )),
                });
            }
            written.push(collection);
        }

        self.ids.observe(next.max_id());
        self.data = next;

        debug!(
            collections = ?touched.iter().map(Collection::key).collect::<Vec<_>>(),
            "Committed ledger"
        );
        Ok(())
    }

    fn restore(&self, written: &[Collection]) {
        for &collection in written {
            let restored = self
                .data
                .encode(collection)
                .and_then(|previous| self.store.set(collection.key(), &previous));
            if let Err(e) = restored {
                warn!(key = collection.key(), error = %e, "Failed to restore collection after write failure");
            }
        }
    }

    /// Append an entry to the audit log, if one is configured
    ///
    /// A failed audit write never undoes a committed change.
    pub fn log_entry(&self, entry: &AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(entry) {
                warn!(error = %e, "Failed to write audit entry");
            }
        }
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.log_entry(
            &AuditEntry::new(Operation::Create, entity_type, entity_id)
                .named(entity_name)
                .after(entity),
        );
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) {
        self.log_entry(
            &AuditEntry::new(Operation::Update, entity_type, entity_id)
                .named(entity_name)
                .before(before)
                .after(after),
        );
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.log_entry(
            &AuditEntry::new(Operation::Delete, entity_type, entity_id)
                .named(entity_name)
                .before(entity),
        );
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("data", &self.data)
            .field("audit", &self.audit.as_ref().map(|a| a.path().clone()))
            .finish()
    }
}

/// Read one collection; missing or malformed documents load as empty
fn load_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    collection: Collection,
) -> LedgerResult<Vec<T>> {
    let Some(raw) = store.get(collection.key())? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            warn!(key = collection.key(), error = %e, "Stored collection is malformed, starting empty");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, WalletType};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn sample_data() -> LedgerData {
        let wallet_id = WalletId::from_raw(1);
        let category_id = CategoryId::from_raw(2);
        let mut wallet = Wallet::new(wallet_id, "Cash", WalletType::Cash);
        wallet.balance = Money::from(-30000);

        LedgerData {
            wallets: vec![wallet],
            categories: vec![Category::new(category_id, "Food", CategoryType::Expense)],
            transactions: vec![Transaction::categorized(
                TransactionId::from_raw(3),
                wallet_id,
                category_id,
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                Money::from(-30000),
                "lunch",
            )],
        }
    }

    #[test]
    fn test_empty_store_loads_empty() {
        let storage = Storage::open(Box::new(MemoryStore::new())).unwrap();
        assert!(storage.wallets().is_empty());
        assert!(storage.categories().is_empty());
        assert!(storage.transactions().is_empty());
    }

    #[test]
    fn test_malformed_collection_loads_empty() {
        let store = MemoryStore::new();
        store.insert_raw("wallets", "{not json");
        store.insert_raw("categories", "[]");

        let storage = Storage::open(Box::new(store)).unwrap();
        assert!(storage.wallets().is_empty());
    }

    #[test]
    fn test_commit_persists_to_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            Storage::open(Box::new(FileStore::new(temp_dir.path().to_path_buf()))).unwrap();

        storage.commit(sample_data(), &Collection::ALL).unwrap();

        let reopened =
            Storage::open(Box::new(FileStore::new(temp_dir.path().to_path_buf()))).unwrap();
        assert_eq!(reopened.data(), &sample_data());
    }

    #[test]
    fn test_failed_commit_restores_written_keys() {
        let shared = Arc::new(MemoryStore::new());
        let mut storage = Storage::open(Box::new(shared.clone())).unwrap();
        storage.commit(LedgerData::default(), &Collection::ALL).unwrap();

        shared.fail_writes_to(Some("transactions"));
        let result = storage.commit(sample_data(), &Collection::ALL);
        assert!(matches!(result, Err(LedgerError::Storage(_))));

        assert!(storage.wallets().is_empty());
        assert_eq!(shared.get("wallets").unwrap().as_deref(), Some("[]"));
        assert_eq!(shared.get("categories").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_generator_seeded_past_existing_ids() {
        let store = MemoryStore::new();
        let far_future = u64::MAX / 2;
        store.insert_raw(
            "wallets",
            &format!(
                r#"[{{"id":{},"name":"Cash","balance":0,"type":"cash"}}]"#,
                far_future
            ),
        );

        let mut storage = Storage::open(Box::new(store)).unwrap();
        assert_eq!(storage.ids().next_raw(), far_future + 1);
    }

    #[test]
    fn test_computed_balance_and_max_id() {
        let data = sample_data();
        assert_eq!(data.computed_balance(WalletId::from_raw(1)), Money::from(-30000));
        assert_eq!(data.computed_balance(WalletId::from_raw(9)), Money::zero());
        assert_eq!(data.max_id(), 3);
    }
}
