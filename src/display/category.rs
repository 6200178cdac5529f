//! Category display formatting

use crate::models::Category;
use crate::services::{CategoryRegistry, RecordStore};

/// Format all categories with their record counts, default first
pub fn format_category_list(registry: &CategoryRegistry, store: &RecordStore) -> String {
    let name_width = registry
        .iter()
        .map(|c| c.name().len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>7}  {}\n",
        "Category",
        "Records",
        "Flags",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:->7}  {:-<16}\n",
        "",
        "",
        "",
        width = name_width
    ));

    for category in registry.iter() {
        output.push_str(&format!(
            "{:<width$}  {:>7}  {}\n",
            category.name(),
            store.records_in_category(category.id).count(),
            flags(category),
            width = name_width
        ));
    }

    output
}

/// Format one category's details
pub fn format_category_details(category: &Category, store: &RecordStore) -> String {
    let total: f64 = store
        .records_in_category(category.id)
        .map(|r| r.amount())
        .sum();

    let mut output = String::new();
    output.push_str(&format!("Category: {}\n", category.name()));
    output.push_str(&format!("  ID:       {}\n", category.id));
    output.push_str(&format!(
        "  Default:  {}\n",
        if category.is_default() { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "  Hidden:   {}\n",
        if category.visible { "No" } else { "Yes" }
    ));
    output.push_str(&format!(
        "  Records:  {}\n",
        store.records_in_category(category.id).count()
    ));
    output.push_str(&format!("  Total:    {:.2}\n", total));
    output
}

fn flags(category: &Category) -> String {
    let mut flags = Vec::new();
    if category.is_default() {
        flags.push("default");
    }
    if !category.visible {
        flags.push("hidden");
    }
    flags.join(", ")
}
