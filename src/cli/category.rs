//! Category CLI commands

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::{TrackerError, TrackerResult};
use crate::models::Category;
use crate::services::CategoryRegistry;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List all categories, default first
    List,

    /// Create a new category (fails if the name is already taken)
    Add {
        /// Category name
        name: String,
    },

    /// Rename a category (its records follow)
    Rename {
        /// Current category name
        category: String,
        /// New name
        new_name: String,
    },

    /// Remove a category and move its records to the default
    #[command(alias = "delete")]
    Remove {
        /// Category name
        category: String,
    },

    /// Make a category the default
    Default {
        /// Category name
        category: String,
    },

    /// Show category details
    Info {
        /// Category name
        category: String,
    },

    /// Mark a category as shown
    Show {
        /// Category name
        category: String,
    },

    /// Mark a category as hidden
    Hide {
        /// Category name
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> TrackerResult<()> {
    let (mut registry, mut store) = storage.load()?;

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&registry, &store));
            return Ok(());
        }

        CategoryCommands::Info { category } => {
            let category = find(&registry, &category)?;
            print!("{}", format_category_details(category, &store));
            return Ok(());
        }

        CategoryCommands::Add { name } => {
            // `create` would hand back the existing category; the command reports it instead
            if registry.find_by_name(name.trim()).is_some() {
                return Err(TrackerError::DuplicateName(name.trim().to_string()));
            }
            let category = registry.create(&name)?;
            println!("Created category: {}", category.name());
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Rename { category, new_name } => {
            let id = find(&registry, &category)?.id;
            registry.rename(id, &new_name)?;
            println!("Renamed category '{}' to '{}'", category, new_name.trim());
        }

        CategoryCommands::Remove { category } => {
            let id = find(&registry, &category)?.id;
            if !registry.remove(id, &mut store) {
                return Err(TrackerError::Validation(
                    "The default category cannot be removed".into(),
                ));
            }
            println!("Removed category: {}", category);
            println!(
                "Its records now belong to '{}'",
                registry.default_category().name()
            );
        }

        CategoryCommands::Default { category } => {
            let id = find(&registry, &category)?.id;
            registry.set_default(id)?;
            println!("Default category is now: {}", category);
        }

        CategoryCommands::Show { category } => {
            let id = find(&registry, &category)?.id;
            registry.set_visible(id, true)?;
            println!("Category '{}' is shown", category);
        }

        CategoryCommands::Hide { category } => {
            let id = find(&registry, &category)?.id;
            registry.set_visible(id, false)?;
            println!("Category '{}' is hidden", category);
        }
    }

    storage.save(&registry, &store)
}

/// Look up a category by exact name
pub(crate) fn find<'a>(registry: &'a CategoryRegistry, name: &str) -> TrackerResult<&'a Category> {
    registry
        .find_by_name(name.trim())
        .ok_or_else(|| TrackerError::category_not_found(name))
}
