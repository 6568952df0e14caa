//! Export module for Pocketbook
//!
//! - JSON: full backup of the three collections, and validated import
//! - CSV: transaction list for spreadsheets

pub mod csv;
pub mod json;

pub use self::csv::export_transactions_csv;
pub use json::{export_json, import_document, ExportDocument};
