//! spendtrack - spending records filed under categories
//!
//! This library keeps a registry of named categories and a store of
//! spending records, each pointing at one category. Reports aggregate the
//! records per category and per month over a date range.
//!
//! # Architecture
//!
//! - `models`: categories, records, ids and spending periods
//! - `services`: the category registry, the record store and CSV import
//! - `reports`: range filtering and per-category/per-month aggregation
//! - `storage`: the JSON tracker file with atomic writes
//! - `config`: path resolution and user settings
//! - `export`: CSV export of summaries
//! - `display`: terminal formatting
//! - `cli`: clap command handlers
//!
//! # Example
//!
//! ```rust
//! use spendtrack::models::Record;
//! use spendtrack::reports::SpendingReport;
//! use spendtrack::services::{CategoryRegistry, RecordStore};
//!
//! let mut registry = CategoryRegistry::new();
//! let food = registry.create("Food")?;
//! let mut store = RecordStore::new();
//! store.add_record(&registry, Record::new("Lunch", 12.5, &food)?)?;
//!
//! let totals = SpendingReport::new(&registry, &store)
//!     .group_by_category_in(spendtrack::models::SpendingPeriod::AllTime);
//! assert_eq!(totals[0].category, "Food");
//! # Ok::<(), spendtrack::TrackerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
