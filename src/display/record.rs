//! Record display formatting

use crate::config::Settings;
use crate::models::{CategoryId, Record};
use crate::services::{CategoryRegistry, RecordStore};

/// Format records as a numbered table, newest first
///
/// The number in the first column is the index accepted by `record edit`
/// and `record remove`, so it stays the store index when filtering.
pub fn format_record_list(
    registry: &CategoryRegistry,
    store: &RecordStore,
    settings: &Settings,
    category: Option<CategoryId>,
    limit: Option<usize>,
) -> String {
    let matching: Vec<(usize, &Record)> = store
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| category.map_or(true, |id| r.category_id() == id))
        .collect();
    if matching.is_empty() {
        return "No records found.\n".to_string();
    }

    let shown = limit.unwrap_or(matching.len()).min(matching.len());
    let title_width = matching
        .iter()
        .take(shown)
        .map(|(_, r)| r.title().len())
        .max()
        .unwrap_or(5)
        .clamp(5, 40);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<10}  {:<title$}  {:<16}  {:>12}\n",
        "#",
        "Date",
        "Title",
        "Category",
        "Amount",
        title = title_width
    ));
    output.push_str(&"-".repeat(title_width + 52));
    output.push('\n');

    for (index, record) in matching.iter().take(shown) {
        output.push_str(&format!(
            "{:>4}  {:<10}  {:<title$}  {:<16}  {:>12}\n",
            index,
            record.time_added().format(&settings.date_format).to_string(),
            truncate(record.title(), title_width),
            truncate(registry.resolve(record.category_id()).name(), 16),
            settings.format_amount(record.amount()),
            title = title_width
        ));
    }

    if shown < matching.len() {
        output.push_str(&format!("... {} more\n", matching.len() - shown));
    }

    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
