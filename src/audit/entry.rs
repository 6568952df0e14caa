//! Audit log entries
//!
//! One entry per committed change: what happened, to which record, and
//! JSON snapshots of the record around the change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::generate_diff;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// Collections were cleared
    Reset,
    /// Collections were replaced by an import
    Import,
}

impl Operation {
    fn label(&self) -> &'static str {
        match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Reset => "RESET",
            Operation::Import => "IMPORT",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Wallet,
    Category,
    Transaction,
    /// The ledger as a whole (resets, imports)
    Ledger,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityType::Wallet => "wallet",
            EntityType::Category => "category",
            EntityType::Transaction => "transaction",
            EntityType::Ledger => "ledger",
        };
        f.write_str(name)
    }
}

/// A single audit log line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// Wallet or category name, or a short label for transactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// `field: old -> new` pairs for updates, free text for ledger operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// An entry stamped now, without snapshots
    pub fn new(operation: Operation, entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name: None,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// A whole-ledger operation (reset, import) with a short summary
    pub fn ledger(operation: Operation, summary: impl Into<String>) -> Self {
        let mut entry = Self::new(operation, EntityType::Ledger, "ledger");
        entry.diff_summary = Some(summary.into());
        entry
    }

    pub fn named(mut self, name: Option<String>) -> Self {
        self.entity_name = name;
        self
    }

    /// Attach the record as it was before the change
    pub fn before<T: Serialize>(mut self, record: &T) -> Self {
        self.before = serde_json::to_value(record).ok();
        self.refresh_diff();
        self
    }

    /// Attach the record as it is after the change
    pub fn after<T: Serialize>(mut self, record: &T) -> Self {
        self.after = serde_json::to_value(record).ok();
        self.refresh_diff();
        self
    }

    fn refresh_diff(&mut self) {
        if let (Some(before), Some(after)) = (&self.before, &self.after) {
            self.diff_summary = generate_diff(before, after);
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<6} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.entity_type,
            self.entity_id
        )?;
        if let Some(name) = &self.entity_name {
            write!(f, " \"{}\"", name)?;
        }
        if let Some(diff) = &self.diff_summary {
            write!(f, "\n    {}", diff)?;
        }
        Ok(())
    }
}
