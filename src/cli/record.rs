//! Record CLI commands

use clap::Subcommand;

use crate::cli::category::find;
use crate::config::Settings;
use crate::display::format_record_list;
use crate::error::{TrackerError, TrackerResult};
use crate::models::Record;
use crate::services::RecordUpdate;
use crate::storage::Storage;

/// Record subcommands
#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// Add a new spending record
    Add {
        /// What the money was spent on
        title: String,
        /// Amount spent (must be greater than zero)
        amount: f64,
        /// Category name (defaults to the default category)
        #[arg(short, long)]
        category: Option<String>,
        /// Timestamp (YYYY-MM-DDTHH:MM:SS), defaults to now
        #[arg(short, long)]
        time: Option<String>,
    },

    /// List records, newest first
    List {
        /// Only records in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of records to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Edit a record by its list index
    Edit {
        /// Index shown by `record list`
        index: usize,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<f64>,
        /// New category name
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Remove a record by its list index
    #[command(alias = "delete")]
    Remove {
        /// Index shown by `record list`
        index: usize,
    },
}

/// Handle a record command
pub fn handle_record_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RecordCommands,
) -> TrackerResult<()> {
    let (registry, mut store) = storage.load()?;

    match cmd {
        RecordCommands::Add {
            title,
            amount,
            category,
            time,
        } => {
            let category = match category {
                Some(name) => find(&registry, &name)?,
                None => registry.default_category(),
            };
            let mut record = Record::new(&title, amount, category)?;
            if let Some(timestamp) = time {
                record.set_time_added(&timestamp)?;
            }
            store.add_record(&registry, record)?;
            println!(
                "Added record: {} {} ({})",
                title.trim(),
                settings.format_amount(amount),
                category.name()
            );
        }

        RecordCommands::List { category, limit } => {
            let category = match category {
                Some(name) => Some(find(&registry, &name)?.id),
                None => None,
            };
            print!(
                "{}",
                format_record_list(&registry, &store, settings, category, limit)
            );
            return Ok(());
        }

        RecordCommands::Edit {
            index,
            title,
            amount,
            category,
        } => {
            if title.is_none() && amount.is_none() && category.is_none() {
                return Err(TrackerError::Validation(
                    "Nothing to change; pass --title, --amount or --category".into(),
                ));
            }
            let category = match category {
                Some(name) => Some(find(&registry, &name)?.id),
                None => None,
            };
            let updated = store.update_record(
                &registry,
                index,
                RecordUpdate {
                    title: title.as_deref(),
                    amount,
                    category,
                },
            )?;
            println!(
                "Updated record {}: {} {}",
                index,
                updated.title(),
                settings.format_amount(updated.amount())
            );
        }

        RecordCommands::Remove { index } => {
            let removed = store
                .remove_at(index)
                .ok_or_else(|| TrackerError::Validation(format!("No record at index {}", index)))?;
            println!(
                "Removed record: {} {}",
                removed.title(),
                settings.format_amount(removed.amount())
            );
        }
    }

    storage.save(&registry, &store)
}
