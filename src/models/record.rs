//! Spending record model
//!
//! A record is a single dated spending event tagged with a category.

use chrono::{Local, NaiveDateTime};
use std::hash::{Hash, Hasher};

use super::category::Category;
use super::ids::CategoryId;
use crate::error::{TrackerError, TrackerResult};

/// Format used when writing `time_added` to persisted state
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A single spending entry
///
/// Equality and hashing are structural over title, amount, category and
/// timestamp.
#[derive(Debug, Clone)]
pub struct Record {
    title: String,
    amount: f64,
    category_id: CategoryId,
    time_added: NaiveDateTime,
}

impl Record {
    /// Create a record stamped with the current local time
    pub fn new(title: &str, amount: f64, category: &Category) -> TrackerResult<Self> {
        Ok(Self {
            title: validate_title(title)?,
            amount: validate_amount(amount)?,
            category_id: category.id,
            time_added: Local::now().naive_local(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Id of the category this record belongs to
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn time_added(&self) -> NaiveDateTime {
        self.time_added
    }

    pub fn set_title(&mut self, title: &str) -> TrackerResult<()> {
        self.title = validate_title(title)?;
        Ok(())
    }

    pub fn set_amount(&mut self, amount: f64) -> TrackerResult<()> {
        self.amount = validate_amount(amount)?;
        Ok(())
    }

    pub fn set_category(&mut self, category: &Category) {
        self.category_id = category.id;
    }

    /// Restore the creation time from persisted state
    ///
    /// Accepts an ISO-8601 local date-time such as `2024-03-05T14:30:00` or
    /// `2024-03-05T14:30:00.125`. No timezone is accepted.
    pub fn set_time_added(&mut self, timestamp: &str) -> TrackerResult<()> {
        self.time_added = parse_timestamp(timestamp)?;
        Ok(())
    }

    /// Timestamp in the persisted ISO-8601 form
    pub fn time_added_iso(&self) -> String {
        self.time_added.format(TIMESTAMP_FORMAT).to_string()
    }

    pub(crate) fn reassign(&mut self, category_id: CategoryId) {
        self.category_id = category_id;
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.amount.to_bits() == other.amount.to_bits()
            && self.category_id == other.category_id
            && self.time_added == other.time_added
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.amount.to_bits().hash(state);
        self.category_id.hash(state);
        self.time_added.hash(state);
    }
}

/// Parse an ISO-8601 local date-time
pub fn parse_timestamp(timestamp: &str) -> TrackerResult<NaiveDateTime> {
    timestamp
        .trim()
        .parse::<NaiveDateTime>()
        .map_err(|e| TrackerError::InvalidTimestamp(format!("{}: {}", timestamp, e)))
}

fn validate_title(title: &str) -> TrackerResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::InvalidName("Title cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn validate_amount(amount: f64) -> TrackerResult<f64> {
    // NaN fails this comparison too
    if amount > 0.0 {
        Ok(amount)
    } else {
        Err(TrackerError::NonPositiveAmount(amount))
    }
}
