//! CLI command handlers
//!
//! Bridges the clap argument parsing with the registry, store and reports.
//! Every mutating command loads the tracker file, applies one change and
//! saves it back.

pub mod category;
pub mod import;
pub mod record;
pub mod report;

pub use category::{handle_category_command, CategoryCommands};
pub use import::handle_import_command;
pub use record::{handle_record_command, RecordCommands};
pub use report::{handle_report_command, RangeArgs, ReportCommands};
