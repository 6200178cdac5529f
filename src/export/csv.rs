//! CSV export of spending summaries

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::reports::{CategoryMonthlyTotals, CategoryTotal};

/// Write `category,total` rows in summary order
pub fn write_category_summary<W: Write>(writer: W, totals: &[CategoryTotal]) -> TrackerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["category", "total"]).map_err(export_error)?;

    for entry in totals {
        let total = format!("{:.2}", entry.total);
        csv_writer
            .write_record([entry.category.as_str(), total.as_str()])
            .map_err(export_error)?;
    }

    csv_writer.flush().map_err(|e| TrackerError::Export(e.to_string()))
}

/// Write `category,month,total` rows, months as `YYYY-MM`
pub fn write_monthly_summary<W: Write>(
    writer: W,
    totals: &[CategoryMonthlyTotals],
) -> TrackerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["category", "month", "total"])
        .map_err(export_error)?;

    for category in totals {
        for month in &category.months {
            let label = month.month.format("%Y-%m").to_string();
            let total = format!("{:.2}", month.total);
            csv_writer
                .write_record([category.category.as_str(), label.as_str(), total.as_str()])
                .map_err(export_error)?;
        }
    }

    csv_writer.flush().map_err(|e| TrackerError::Export(e.to_string()))
}

fn export_error(err: csv::Error) -> TrackerError {
    TrackerError::Export(err.to_string())
}
