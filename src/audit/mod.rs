//! Audit logging for Pocketbook
//!
//! Every ledger mutation is recorded with before/after snapshots in an
//! append-only JSONL file.
//!
//! - `AuditEntry`: one logged operation with its entity snapshots
//! - `AuditLogger`: appends entries to the log file and reads them back
//! - `generate_diff`: field-level change summary for updates

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
