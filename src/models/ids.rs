//! Strongly-typed ID wrappers for all entity types
//!
//! Ids are plain integers on disk (the persisted layout stores numeric ids),
//! but newtype wrappers keep wallet, category and transaction ids from being
//! mixed up at compile time.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw numeric id
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the raw numeric id
            pub const fn value(&self) -> u64 {
                self.0
            }

            /// Parse an ID from a string, with or without its display prefix
            pub fn parse(s: &str) -> Result<Self, ParseIntError> {
                s.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(WalletId, "wal-");
define_id!(CategoryId, "cat-");
define_id!(TransactionId, "txn-");

/// Issues unique, strictly increasing ids
///
/// Ids track the wall clock in milliseconds, but never repeat: when two ids
/// are requested within the same millisecond the second one is bumped past
/// the first.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Create a generator that will only issue ids above `floor`
    pub fn seeded(floor: u64) -> Self {
        Self { last: floor }
    }

    /// Never issue an id at or below `floor` from now on
    pub fn observe(&mut self, floor: u64) {
        self.last = self.last.max(floor);
    }

    /// Issue the next raw id
    pub fn next_raw(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last + 1);
        self.last = id;
        id
    }

    pub fn wallet(&mut self) -> WalletId {
        WalletId(self.next_raw())
    }

    pub fn category(&mut self) -> CategoryId {
        CategoryId(self.next_raw())
    }

    pub fn transaction(&mut self) -> TransactionId {
        TransactionId(self.next_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = WalletId::from_raw(1700000000000);
        assert_eq!(id.to_string(), "wal-1700000000000");
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        assert_eq!(
            "txn-42".parse::<TransactionId>().unwrap(),
            TransactionId::from_raw(42)
        );
        assert_eq!(CategoryId::parse("42").unwrap(), CategoryId::from_raw(42));
        assert!(WalletId::parse("cash").is_err());
    }

    #[test]
    fn test_id_serialization_is_numeric() {
        let id = WalletId::from_raw(1718000000123);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "1718000000123");

        let back: WalletId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_generator_is_strictly_increasing() {
        let mut ids = IdGenerator::default();
        let mut last = 0;
        for _ in 0..1000 {
            let next = ids.next_raw();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn test_generator_respects_seed() {
        let far_future = u64::MAX / 2;
        let mut ids = IdGenerator::seeded(far_future);
        assert_eq!(ids.next_raw(), far_future + 1);

        ids.observe(far_future + 10);
        assert_eq!(ids.transaction(), TransactionId::from_raw(far_future + 11));
    }
}
