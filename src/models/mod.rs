//! Core data models for spendtrack
//!
//! Categories, spending records and the reporting periods used to slice
//! them.

pub mod category;
pub mod ids;
pub mod period;
pub mod record;

pub use category::{Category, DEFAULT_CATEGORY_NAME};
pub use ids::CategoryId;
pub use period::{month_end, month_start, SpendingPeriod};
pub use record::Record;
