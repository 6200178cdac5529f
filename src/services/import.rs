//! CSV import service
//!
//! Batch-imports records from a CSV file with the columns
//! `title,amount,category,timeAdded`. The `timeAdded` column may be left
//! empty, in which case the import time is used. Unknown categories are
//! created on the fly.

use std::io::Read;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::Record;
use crate::services::{CategoryRegistry, RecordStore};

/// One CSV row before validation
#[derive(Debug, Deserialize)]
struct ImportRow {
    title: String,
    amount: f64,
    #[serde(default)]
    category: String,
    #[serde(default, rename = "timeAdded")]
    time_added: Option<String>,
}

/// Outcome of an import run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    /// One message per skipped row, with its 1-based line number
    pub errors: Vec<String>,
}

/// Import every valid row, skipping the rest
///
/// Rows are added in file order, so the last row ends up first in the store.
pub fn import_records_csv<R: Read>(
    reader: R,
    registry: &mut CategoryRegistry,
    store: &mut RecordStore,
) -> TrackerResult<ImportSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut summary = ImportSummary::default();

    for (index, row) in csv_reader.deserialize::<ImportRow>().enumerate() {
        // Header is line 1
        let line = index + 2;
        match row
            .map_err(TrackerError::from)
            .and_then(|row| import_row(row, registry, store))
        {
            Ok(()) => summary.imported += 1,
            Err(e) => {
                warn!(line, error = %e, "skipped import row");
                summary.skipped += 1;
                summary.errors.push(format!("line {}: {}", line, e));
            }
        }
    }

    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "csv import finished"
    );
    Ok(summary)
}

fn import_row(
    row: ImportRow,
    registry: &mut CategoryRegistry,
    store: &mut RecordStore,
) -> TrackerResult<()> {
    // Validate the record before creating any category for it
    let mut record = Record::new(&row.title, row.amount, registry.default_category())?;
    if let Some(timestamp) = row.time_added.as_deref().filter(|t| !t.is_empty()) {
        record.set_time_added(timestamp)?;
    }
    if !row.category.trim().is_empty() {
        let category = registry.create(&row.category)?;
        record.set_category(&category);
    }
    store.add_record(registry, record)
}
