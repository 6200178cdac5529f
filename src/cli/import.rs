//! CLI command handler for CSV import

use std::fs::File;
use std::path::Path;

use crate::error::{TrackerError, TrackerResult};
use crate::services::import_records_csv;
use crate::storage::Storage;

/// Handle the import command
///
/// Valid rows are saved even when some rows are rejected.
pub fn handle_import_command(storage: &Storage, file: &Path) -> TrackerResult<()> {
    let input = File::open(file).map_err(|e| {
        TrackerError::Import(format!("Failed to open {}: {}", file.display(), e))
    })?;

    let (mut registry, mut store) = storage.load()?;
    let summary = import_records_csv(input, &mut registry, &mut store)?;

    if summary.imported > 0 {
        storage.save(&registry, &store)?;
    }

    println!("Import from '{}'", file.display());
    println!("{}", "=".repeat(40));
    println!("  Imported: {}", summary.imported);
    println!("  Skipped:  {}", summary.skipped);
    for error in &summary.errors {
        println!("    {}", error);
    }

    Ok(())
}
