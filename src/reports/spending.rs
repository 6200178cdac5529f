//! Spending summaries
//!
//! Read-only aggregation over a record store: date-range filtering, totals
//! per category, and totals per category and month. Output ordering is
//! deterministic so repeated runs over the same data compare equal.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{month_start, Record, SpendingPeriod};
use crate::services::{CategoryRegistry, RecordStore};

/// Total spending for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Total spending for one month (keyed by the month's first day)
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    pub month: NaiveDate,
    pub total: f64,
}

/// Monthly totals for one category, newest month first
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMonthlyTotals {
    pub category: String,
    pub months: Vec<MonthTotal>,
}

impl CategoryMonthlyTotals {
    /// Sum across every month
    pub fn total(&self) -> f64 {
        self.months.iter().map(|m| m.total).sum()
    }
}

/// Aggregation view over a registry and its record store
#[derive(Debug, Clone, Copy)]
pub struct SpendingReport<'a> {
    registry: &'a CategoryRegistry,
    store: &'a RecordStore,
}

impl<'a> SpendingReport<'a> {
    pub fn new(registry: &'a CategoryRegistry, store: &'a RecordStore) -> Self {
        Self { registry, store }
    }

    /// Records added between `from` and `to`, in store order
    ///
    /// The lower bound is exclusive: a record stamped exactly at midnight of
    /// `from` is left out. The upper bound is the last instant of `to`,
    /// inclusive.
    pub fn filter_by_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&'a Record> {
        let start = from.and_time(NaiveTime::MIN);
        let end = end_of_day(to);
        self.store
            .records()
            .iter()
            .filter(|r| r.time_added() > start && r.time_added() <= end)
            .collect()
    }

    /// Totals per category name, largest first
    ///
    /// Ties keep the order in which categories were first met. Categories
    /// without records in range are omitted.
    pub fn group_by_category(&self, from: NaiveDate, to: NaiveDate) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for record in self.filter_by_range(from, to) {
            let name = self.category_name(record);
            match totals.iter_mut().find(|t| t.category == name) {
                Some(entry) => entry.total += record.amount(),
                None => totals.push(CategoryTotal {
                    category: name.to_string(),
                    total: record.amount(),
                }),
            }
        }

        // Vec::sort_by is stable
        totals.sort_by(|a, b| b.total.total_cmp(&a.total));
        totals
    }

    /// [`group_by_category`](Self::group_by_category) over a month or all time
    pub fn group_by_category_in(&self, period: SpendingPeriod) -> Vec<CategoryTotal> {
        self.group_by_category(period.start_date(), period.end_date())
    }

    /// Totals per category, then per month within each category
    ///
    /// Categories appear in first-seen order. Within a category, records are
    /// ordered newest first before bucketing, so months run newest to
    /// oldest.
    pub fn group_by_category_and_month(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<CategoryMonthlyTotals> {
        let mut partitions: Vec<(String, Vec<&Record>)> = Vec::new();
        for record in self.filter_by_range(from, to) {
            let name = self.category_name(record);
            match partitions.iter_mut().find(|(category, _)| category.as_str() == name) {
                Some((_, records)) => records.push(record),
                None => partitions.push((name.to_string(), vec![record])),
            }
        }

        partitions
            .into_iter()
            .map(|(category, mut records)| {
                records.sort_by(|a, b| b.time_added().cmp(&a.time_added()));
                CategoryMonthlyTotals {
                    category,
                    months: sum_by_month(&records),
                }
            })
            .collect()
    }

    /// [`group_by_category_and_month`](Self::group_by_category_and_month) over
    /// a month or all time
    pub fn group_by_category_and_month_in(
        &self,
        period: SpendingPeriod,
    ) -> Vec<CategoryMonthlyTotals> {
        self.group_by_category_and_month(period.start_date(), period.end_date())
    }

    /// Sum of every record in range
    pub fn total_in_range(&self, from: NaiveDate, to: NaiveDate) -> f64 {
        self.filter_by_range(from, to)
            .iter()
            .map(|r| r.amount())
            .sum()
    }

    fn category_name(&self, record: &Record) -> &'a str {
        self.registry.resolve(record.category_id()).name()
    }
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}

fn sum_by_month(records: &[&Record]) -> Vec<MonthTotal> {
    let mut months: Vec<MonthTotal> = Vec::new();
    for record in records {
        let month = month_start(record.time_added().date());
        match months.iter_mut().find(|m| m.month == month) {
            Some(entry) => entry.total += record.amount(),
            None => months.push(MonthTotal {
                month,
                total: record.amount(),
            }),
        }
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add(
        registry: &CategoryRegistry,
        store: &mut RecordStore,
        category: &Category,
        amount: f64,
        timestamp: &str,
    ) {
        let mut record = Record::new("Item", amount, category).unwrap();
        record.set_time_added(timestamp).unwrap();
        store.add_record(registry, record).unwrap();
    }

    fn fixture() -> (CategoryRegistry, RecordStore) {
        let mut registry = CategoryRegistry::new();
        let a = registry.create("A").unwrap();
        let b = registry.create("B").unwrap();
        let mut store = RecordStore::new();
        add(&registry, &mut store, &a, 300.0, "2024-03-05T10:00:00");
        add(&registry, &mut store, &b, 100.0, "2024-03-06T10:00:00");
        add(&registry, &mut store, &b, 250.0, "2024-04-02T10:00:00");
        (registry, store)
    }

    fn totals(summary: &[CategoryTotal]) -> Vec<(&str, f64)> {
        summary
            .iter()
            .map(|t| (t.category.as_str(), t.total))
            .collect()
    }

    #[test]
    fn test_group_by_category_sorted_descending() {
        let (registry, store) = fixture();
        let report = SpendingReport::new(&registry, &store);

        let summary = report.group_by_category(date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(totals(&summary), vec![("B", 350.0), ("A", 300.0)]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let mut registry = CategoryRegistry::new();
        let x = registry.create("X").unwrap();
        let y = registry.create("Y").unwrap();
        let mut store = RecordStore::new();
        // Store is newest first, so Y is met before X
        add(&registry, &mut store, &x, 50.0, "2024-05-01T10:00:00");
        add(&registry, &mut store, &y, 50.0, "2024-05-02T10:00:00");

        let report = SpendingReport::new(&registry, &store);
        let summary = report.group_by_category_in(SpendingPeriod::AllTime);
        assert_eq!(totals(&summary), vec![("Y", 50.0), ("X", 50.0)]);

        let again = report.group_by_category_in(SpendingPeriod::AllTime);
        assert_eq!(summary, again);
    }

    #[test]
    fn test_empty_categories_omitted() {
        let (mut registry, store) = fixture();
        registry.create("Unused").unwrap();
        let report = SpendingReport::new(&registry, &store);

        let summary = report.group_by_category_in(SpendingPeriod::AllTime);
        assert!(summary.iter().all(|t| t.category != "Unused"));
        assert!(summary.iter().all(|t| t.total != 0.0));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let (registry, store) = fixture();
        let report = SpendingReport::new(&registry, &store);
        assert!(report
            .group_by_category(date(2024, 12, 31), date(2024, 1, 1))
            .is_empty());
    }

    #[test]
    fn test_range_boundaries() {
        let mut registry = CategoryRegistry::new();
        let food = registry.create("Food").unwrap();
        let mut store = RecordStore::new();
        add(&registry, &mut store, &food, 1.0, "2024-06-10T00:00:00");
        add(&registry, &mut store, &food, 2.0, "2024-06-11T00:00:00");
        add(&registry, &mut store, &food, 4.0, "2024-06-10T23:59:59.999999999");
        add(&registry, &mut store, &food, 8.0, "2024-06-09T23:59:59.999999999");
        let report = SpendingReport::new(&registry, &store);

        // Midnight of `from` is excluded, midnight after `to` is excluded,
        // the last nanosecond of `to` is included
        let amounts: Vec<f64> = report
            .filter_by_range(date(2024, 6, 10), date(2024, 6, 10))
            .iter()
            .map(|r| r.amount())
            .collect();
        assert_eq!(amounts, vec![4.0]);

        assert_eq!(report.total_in_range(date(2024, 6, 9), date(2024, 6, 10)), 13.0);
    }

    #[test]
    fn test_group_by_month_period() {
        let (registry, store) = fixture();
        let report = SpendingReport::new(&registry, &store);

        let march = report.group_by_category_in(SpendingPeriod::month(2024, 3));
        assert_eq!(totals(&march), vec![("A", 300.0), ("B", 100.0)]);

        let all = report.group_by_category_in(SpendingPeriod::AllTime);
        assert_eq!(totals(&all), vec![("B", 350.0), ("A", 300.0)]);
    }

    #[test]
    fn test_group_by_category_and_month() {
        let (registry, store) = fixture();
        let report = SpendingReport::new(&registry, &store);

        let monthly = report.group_by_category_and_month_in(SpendingPeriod::AllTime);
        assert_eq!(
            monthly,
            vec![
                CategoryMonthlyTotals {
                    category: "B".into(),
                    months: vec![
                        MonthTotal {
                            month: date(2024, 4, 1),
                            total: 250.0
                        },
                        MonthTotal {
                            month: date(2024, 3, 1),
                            total: 100.0
                        },
                    ],
                },
                CategoryMonthlyTotals {
                    category: "A".into(),
                    months: vec![MonthTotal {
                        month: date(2024, 3, 1),
                        total: 300.0
                    }],
                },
            ]
        );
        assert_eq!(monthly[0].total(), 350.0);
    }

    #[test]
    fn test_months_ordered_newest_first_regardless_of_insertion() {
        let mut registry = CategoryRegistry::new();
        let food = registry.create("Food").unwrap();
        let mut store = RecordStore::new();
        // Backfilled out of order
        add(&registry, &mut store, &food, 1.0, "2024-02-01T10:00:00");
        add(&registry, &mut store, &food, 2.0, "2024-01-15T10:00:00");
        add(&registry, &mut store, &food, 4.0, "2024-03-20T10:00:00");
        add(&registry, &mut store, &food, 8.0, "2024-01-02T10:00:00");

        let report = SpendingReport::new(&registry, &store);
        let monthly = report.group_by_category_and_month_in(SpendingPeriod::AllTime);
        let months: Vec<(NaiveDate, f64)> = monthly[0]
            .months
            .iter()
            .map(|m| (m.month, m.total))
            .collect();
        assert_eq!(
            months,
            vec![
                (date(2024, 3, 1), 4.0),
                (date(2024, 2, 1), 1.0),
                (date(2024, 1, 1), 10.0),
            ]
        );
    }

    #[test]
    fn test_summary_follows_category_rename() {
        let (mut registry, store) = fixture();
        let a = registry.by_name("A").id;
        registry.rename(a, "Rent").unwrap();
        let report = SpendingReport::new(&registry, &store);

        let summary = report.group_by_category_in(SpendingPeriod::AllTime);
        assert_eq!(totals(&summary), vec![("B", 350.0), ("Rent", 300.0)]);
    }
}
