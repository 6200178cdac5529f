//! Service layer for spendtrack
//!
//! The category registry and record store hold the tracker's mutable state
//! and enforce that every record points at a registered category.

pub mod category;
pub mod import;
pub mod record;

pub use category::CategoryRegistry;
pub use import::{import_records_csv, ImportSummary};
pub use record::{RecordStore, RecordUpdate};
