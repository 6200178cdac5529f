//! CLI commands for spending reports

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{format_category_summary, format_month_list, format_monthly_summary};
use crate::error::{TrackerError, TrackerResult};
use crate::export::{write_category_summary, write_monthly_summary};
use crate::models::SpendingPeriod;
use crate::reports::SpendingReport;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Total spending per category, largest first
    #[command(alias = "spending")]
    Categories(RangeArgs),

    /// Spending per category broken down by month
    Monthly(RangeArgs),

    /// List the months that have records, newest first
    Months,
}

/// Date range selection shared by the summaries
#[derive(Args, Debug, Default)]
pub struct RangeArgs {
    /// Month to report on (YYYY-MM), or "all"
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    pub month: Option<String>,

    /// First day of the range (YYYY-MM-DD)
    #[arg(short, long)]
    pub from: Option<String>,

    /// Last day of the range (YYYY-MM-DD), inclusive
    #[arg(short, long)]
    pub to: Option<String>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// A resolved date range plus its heading
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub heading: String,
}

impl RangeArgs {
    /// Resolve the options to a date range; no options means all time
    pub fn resolve(&self) -> TrackerResult<ReportRange> {
        if let Some(month) = &self.month {
            let period = SpendingPeriod::parse(month).map_err(|e| {
                TrackerError::Validation(format!("{}. Use YYYY-MM (e.g., 2025-01) or 'all'", e))
            })?;
            return Ok(ReportRange {
                from: period.start_date(),
                to: period.end_date(),
                heading: period.to_string(),
            });
        }

        if self.from.is_none() && self.to.is_none() {
            let period = SpendingPeriod::AllTime;
            return Ok(ReportRange {
                from: period.start_date(),
                to: period.end_date(),
                heading: period.to_string(),
            });
        }

        let from = parse_date(self.from.as_deref(), "start")?.unwrap_or(NaiveDate::MIN);
        let to = parse_date(self.to.as_deref(), "end")?
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let heading = match &self.from {
            Some(_) => format!("{} to {}", from, to),
            None => format!("up to {}", to),
        };
        Ok(ReportRange { from, to, heading })
    }
}

fn parse_date(value: Option<&str>, which: &str) -> TrackerResult<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
                TrackerError::Validation(format!(
                    "Invalid {} date format: {}. Use YYYY-MM-DD",
                    which, s
                ))
            })
        })
        .transpose()
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TrackerResult<()> {
    let (registry, store) = storage.load()?;
    let report = SpendingReport::new(&registry, &store);

    match cmd {
        ReportCommands::Categories(args) => {
            let range = args.resolve()?;
            let totals = report.group_by_category(range.from, range.to);
            match args.output {
                Some(path) => {
                    write_category_summary(create_output(&path)?, &totals)?;
                    println!("Category summary exported to: {}", path.display());
                }
                None => print!(
                    "{}",
                    format_category_summary(&range.heading, &totals, settings)
                ),
            }
        }

        ReportCommands::Monthly(args) => {
            let range = args.resolve()?;
            let totals = report.group_by_category_and_month(range.from, range.to);
            match args.output {
                Some(path) => {
                    write_monthly_summary(create_output(&path)?, &totals)?;
                    println!("Monthly summary exported to: {}", path.display());
                }
                None => print!(
                    "{}",
                    format_monthly_summary(&range.heading, &totals, settings)
                ),
            }
        }

        ReportCommands::Months => {
            print!("{}", format_month_list(&store.distinct_months(), settings));
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> TrackerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
