//! Transaction search and filtering

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{Category, CategoryId, Transaction, Wallet, WalletId};

/// Label shown for rows without a category
pub const TRANSFER_LABEL: &str = "Transfer";
const UNKNOWN_WALLET: &str = "Unknown Wallet";
const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// Resolves wallet and category ids to display names
#[derive(Debug, Clone, Default)]
pub struct NameLookup<'a> {
    wallets: HashMap<WalletId, &'a str>,
    categories: HashMap<CategoryId, &'a str>,
}

impl<'a> NameLookup<'a> {
    pub fn new(wallets: &'a [Wallet], categories: &'a [Category]) -> Self {
        Self {
            wallets: wallets.iter().map(|w| (w.id, w.name.as_str())).collect(),
            categories: categories.iter().map(|c| (c.id, c.name.as_str())).collect(),
        }
    }

    pub fn wallet_name(&self, id: WalletId) -> &'a str {
        self.wallets.get(&id).copied().unwrap_or(UNKNOWN_WALLET)
    }

    /// Category name, or `Transfer` for uncategorized rows
    pub fn category_label(&self, id: Option<CategoryId>) -> &'a str {
        match id {
            None => TRANSFER_LABEL,
            Some(id) => self.categories.get(&id).copied().unwrap_or(UNKNOWN_CATEGORY),
        }
    }
}

/// Criteria for [`filter_transactions`]; empty criteria match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Case-insensitive text matched against note, wallet and category names
    pub query: Option<String>,
    pub category_id: Option<CategoryId>,
    pub wallet_id: Option<WalletId>,
    /// Inclusive on both ends
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    pub fn category(mut self, id: CategoryId) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn wallet(mut self, id: WalletId) -> Self {
        self.wallet_id = Some(id);
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction, lookup: &NameLookup<'_>, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            let hit = [
                txn.note.as_str(),
                lookup.wallet_name(txn.wallet_id),
                lookup.category_label(txn.category_id),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(needle));
            if !hit {
                return false;
            }
        }

        if self.category_id.is_some() && txn.category_id != self.category_id {
            return false;
        }

        if self.wallet_id.is_some_and(|w| txn.wallet_id != w) {
            return false;
        }

        match self.date_range {
            Some((start, end)) => (start..=end).contains(&txn.date),
            None => true,
        }
    }
}

/// Matching transactions, newest first
pub fn filter_transactions<'t>(
    transactions: &'t [Transaction],
    lookup: &NameLookup<'_>,
    filter: &TransactionFilter,
) -> Vec<&'t Transaction> {
    let needle = filter.query.as_ref().map(|q| q.to_lowercase());

    let mut matched: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(t, lookup, needle.as_deref()))
        .collect();

    matched.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = filter.limit {
        matched.truncate(limit);
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, Money, TransactionId, WalletType};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn setup() -> (Vec<Wallet>, Vec<Category>, Vec<Transaction>) {
        let wallets = vec![
            Wallet::new(WalletId::from_raw(1), "Dompet", WalletType::Cash),
            Wallet::new(WalletId::from_raw(2), "BCA", WalletType::Bank),
        ];
        let categories = vec![
            Category::new(CategoryId::from_raw(10), "Makan", CategoryType::Expense),
            Category::new(CategoryId::from_raw(11), "Gaji", CategoryType::Income),
        ];

        let mut transfer = Transaction::new(
            TransactionId::from_raw(103),
            WalletId::from_raw(1),
            date(2, 1),
            Money::from(-20000),
        );
        transfer.is_transfer = true;
        transfer.note = "Transfer to BCA".into();

        let transactions = vec![
            Transaction::categorized(
                TransactionId::from_raw(101),
                WalletId::from_raw(1),
                CategoryId::from_raw(10),
                date(1, 5),
                Money::from(-30000),
                "nasi padang",
            ),
            Transaction::categorized(
                TransactionId::from_raw(102),
                WalletId::from_raw(2),
                CategoryId::from_raw(11),
                date(1, 25),
                Money::from(5000000),
                "",
            ),
            transfer,
            Transaction::categorized(
                TransactionId::from_raw(104),
                WalletId::from_raw(9),
                CategoryId::from_raw(99),
                date(3, 1),
                Money::from(-1),
                "",
            ),
        ];
        (wallets, categories, transactions)
    }

    fn ids(found: &[&Transaction]) -> Vec<u64> {
        found.iter().map(|t| t.id.value()).collect()
    }

    #[test]
    fn test_empty_filter_returns_all_newest_first() {
        let (w, c, t) = setup();
        let lookup = NameLookup::new(&w, &c);
        let found = filter_transactions(&t, &lookup, &TransactionFilter::new());
        assert_eq!(ids(&found), vec![104, 103, 102, 101]);
    }

    #[test]
    fn test_query_matches_note_wallet_and_category() {
        let (w, c, t) = setup();
        let lookup = NameLookup::new(&w, &c);

        let by_note = filter_transactions(&t, &lookup, &TransactionFilter::new().query("PADANG"));
        assert_eq!(ids(&by_note), vec![101]);

        let by_wallet = filter_transactions(&t, &lookup, &TransactionFilter::new().query("bca"));
        assert_eq!(ids(&by_wallet), vec![103, 102]);

        let by_category = filter_transactions(&t, &lookup, &TransactionFilter::new().query("gaji"));
        assert_eq!(ids(&by_category), vec![102]);

        let by_transfer = filter_transactions(&t, &lookup, &TransactionFilter::new().query("transfer"));
        assert_eq!(ids(&by_transfer), vec![103]);

        let dangling = filter_transactions(&t, &lookup, &TransactionFilter::new().query("unknown"));
        assert_eq!(ids(&dangling), vec![104]);
    }

    #[test]
    fn test_category_wallet_and_date_filters() {
        let (w, c, t) = setup();
        let lookup = NameLookup::new(&w, &c);

        let food = filter_transactions(
            &t,
            &lookup,
            &TransactionFilter::new().category(CategoryId::from_raw(10)),
        );
        assert_eq!(ids(&food), vec![101]);

        let dompet = filter_transactions(
            &t,
            &lookup,
            &TransactionFilter::new().wallet(WalletId::from_raw(1)),
        );
        assert_eq!(ids(&dompet), vec![103, 101]);

        let january = filter_transactions(
            &t,
            &lookup,
            &TransactionFilter::new().date_range(date(1, 5), date(1, 25)),
        );
        assert_eq!(ids(&january), vec![102, 101]);
    }

    #[test]
    fn test_limit() {
        let (w, c, t) = setup();
        let lookup = NameLookup::new(&w, &c);
        let found = filter_transactions(&t, &lookup, &TransactionFilter::new().limit(2));
        assert_eq!(ids(&found), vec![104, 103]);
    }

    #[test]
    fn test_empty_query_is_ignored() {
        assert_eq!(TransactionFilter::new().query("").query, None);
    }

    #[test]
    fn test_query_is_matched_verbatim() {
        let (w, c, t) = setup();
        let lookup = NameLookup::new(&w, &c);

        let inner_space = filter_transactions(&t, &lookup, &TransactionFilter::new().query("i p"));
        assert_eq!(ids(&inner_space), vec![101]);

        let padded = filter_transactions(&t, &lookup, &TransactionFilter::new().query("padang "));
        assert!(padded.is_empty());
    }
}
