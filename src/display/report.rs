//! Summary display formatting

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::SpendingPeriod;
use crate::reports::{CategoryMonthlyTotals, CategoryTotal};

/// Format per-category totals with a grand total
pub fn format_category_summary(
    heading: &str,
    totals: &[CategoryTotal],
    settings: &Settings,
) -> String {
    let mut output = format!("Spending by category: {}\n", heading);
    output.push_str(&"=".repeat(48));
    output.push('\n');

    if totals.is_empty() {
        output.push_str("No spending in this period.\n");
        return output;
    }

    for entry in totals {
        output.push_str(&format!(
            "{:<32} {:>14}\n",
            entry.category,
            settings.format_amount(entry.total)
        ));
    }

    let grand_total: f64 = totals.iter().map(|t| t.total).sum();
    output.push_str(&"-".repeat(48));
    output.push('\n');
    output.push_str(&format!(
        "{:<32} {:>14}\n",
        "TOTAL",
        settings.format_amount(grand_total)
    ));
    output
}

/// Format per-category, per-month totals
pub fn format_monthly_summary(
    heading: &str,
    totals: &[CategoryMonthlyTotals],
    settings: &Settings,
) -> String {
    let mut output = format!("Spending by category and month: {}\n", heading);
    output.push_str(&"=".repeat(48));
    output.push('\n');

    if totals.is_empty() {
        output.push_str("No spending in this period.\n");
        return output;
    }

    for category in totals {
        output.push_str(&format!(
            "\n{} ({})\n",
            category.category,
            settings.format_amount(category.total())
        ));
        for month in &category.months {
            output.push_str(&format!(
                "  {:<30} {:>14}\n",
                month.month.format(&settings.month_format).to_string(),
                settings.format_amount(month.total)
            ));
        }
    }
    output
}

/// Format the months that have records, newest first
pub fn format_month_list(months: &[NaiveDate], settings: &Settings) -> String {
    if months.is_empty() {
        return "No records yet.\n".to_string();
    }

    let mut output = String::new();
    for month in months {
        output.push_str(&format!(
            "{}  {}\n",
            SpendingPeriod::containing(*month),
            month.format(&settings.month_format)
        ));
    }
    output
}
