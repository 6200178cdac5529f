use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use spendtrack::cli::{
    handle_category_command, handle_import_command, handle_record_command, handle_report_command,
    CategoryCommands, RecordCommands, ReportCommands,
};
use spendtrack::config::{Settings, TrackerPaths};
use spendtrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendtrack",
    version,
    about = "Track spending records by category",
    long_about = "spendtrack keeps a list of spending records, each filed under a \
                  category, and summarizes them per category and per month."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Spending record commands
    #[command(subcommand, alias = "rec")]
    Record(RecordCommands),

    /// Spending summaries
    #[command(subcommand)]
    Report(ReportCommands),

    /// Import records from a CSV file (title,amount,category,timeAdded)
    Import {
        /// Path to CSV file
        file: PathBuf,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    spendtrack::logging::init();
    let cli = Cli::parse();

    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Record(cmd)) => handle_record_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Import { file }) => handle_import_command(&storage, &file)?,
        Some(Commands::Config) => {
            println!("spendtrack Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Tracker file:     {}", paths.tracker_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Month format:    {}", settings.month_format);
        }
        None => {
            println!("spendtrack - spending records by category");
            println!();
            println!("Run 'spendtrack --help' for usage information.");
        }
    }

    Ok(())
}
