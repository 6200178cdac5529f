//! Record store
//!
//! An ordered collection of spending records, newest first. Every record's
//! category must be registered in the [`CategoryRegistry`] passed to the
//! mutating calls.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{month_start, CategoryId, Record};
use crate::services::CategoryRegistry;

/// Spending records, index 0 being the most recently added
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<Record>,
}

/// Changes to apply to a stored record in one step
#[derive(Debug, Clone, Default)]
pub struct RecordUpdate<'a> {
    pub title: Option<&'a str>,
    pub amount: Option<f64>,
    pub category: Option<CategoryId>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record at the front
    ///
    /// Fails with `CategoryNotFound` if the record's category is not in
    /// `registry`.
    pub fn add_record(&mut self, registry: &CategoryRegistry, record: Record) -> TrackerResult<()> {
        if !registry.contains(record.category_id()) {
            return Err(TrackerError::category_not_found(
                record.category_id().to_string(),
            ));
        }
        self.records.insert(0, record);
        Ok(())
    }

    /// Remove the first record equal to `record`; returns whether one was found
    pub fn remove_record(&mut self, record: &Record) -> bool {
        match self.records.iter().position(|r| r == record) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the record at `index`
    pub fn remove_at(&mut self, index: usize) -> Option<Record> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    /// Apply an edit to the record at `index`
    ///
    /// Every field is validated before anything is written, so a failed
    /// update leaves the record untouched.
    pub fn update_record(
        &mut self,
        registry: &CategoryRegistry,
        index: usize,
        update: RecordUpdate<'_>,
    ) -> TrackerResult<&Record> {
        let current = self
            .records
            .get(index)
            .ok_or_else(|| TrackerError::Validation(format!("No record at index {}", index)))?;

        let mut edited = current.clone();
        if let Some(title) = update.title {
            edited.set_title(title)?;
        }
        if let Some(amount) = update.amount {
            edited.set_amount(amount)?;
        }
        if let Some(category_id) = update.category {
            let category = registry
                .get(category_id)
                .ok_or_else(|| TrackerError::category_not_found(category_id.to_string()))?;
            edited.set_category(category);
        }

        self.records[index] = edited;
        Ok(&self.records[index])
    }

    /// Calendar months that have records, newest first, each as day 1
    pub fn distinct_months(&self) -> Vec<NaiveDate> {
        let mut months: Vec<NaiveDate> = self
            .records
            .iter()
            .map(|r| month_start(r.time_added().date()))
            .collect();
        months.sort_unstable_by(|a, b| b.cmp(a));
        months.dedup();
        months
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records tagged with `category`
    pub fn records_in_category(&self, category: CategoryId) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(move |r| r.category_id() == category)
    }

    /// Sum of every record's amount
    pub fn total(&self) -> f64 {
        self.records.iter().map(|r| r.amount()).sum()
    }

    /// Point every record in `from` at `to`; returns how many moved
    pub(crate) fn reassign_category(&mut self, from: CategoryId, to: CategoryId) -> usize {
        let mut moved = 0;
        for record in self.records.iter_mut().filter(|r| r.category_id() == from) {
            record.reassign(to);
            moved += 1;
        }
        if moved > 0 {
            debug!(moved, "reassigned records");
        }
        moved
    }

    /// Append in stored order, used when rebuilding from persisted state
    pub(crate) fn push_back(&mut self, registry: &CategoryRegistry, record: Record) -> TrackerResult<()> {
        if !registry.contains(record.category_id()) {
            return Err(TrackerError::category_not_found(
                record.category_id().to_string(),
            ));
        }
        self.records.push(record);
        Ok(())
    }
}
