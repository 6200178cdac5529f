//! Reports module for spendtrack
//!
//! Spending summaries by category and by category and month.

pub mod spending;

pub use spending::{CategoryMonthlyTotals, CategoryTotal, MonthTotal, SpendingReport};
