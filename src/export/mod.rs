//! Export module for spendtrack
//!
//! Writes spending summaries to CSV.

pub mod csv;

pub use self::csv::{write_category_summary, write_monthly_summary};
