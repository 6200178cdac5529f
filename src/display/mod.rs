//! Display formatting for terminal output

pub mod category;
pub mod record;
pub mod report;

pub use category::{format_category_details, format_category_list};
pub use record::format_record_list;
pub use report::{format_category_summary, format_month_list, format_monthly_summary};
