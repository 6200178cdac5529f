//! Reporting period selection
//!
//! Summaries are computed either for a single calendar month or for all
//! time.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;

/// Which slice of time a summary covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpendingPeriod {
    /// Every record ever added
    AllTime,

    /// One calendar month (e.g., "2025-01")
    Month { year: i32, month: u32 },
}

impl SpendingPeriod {
    /// Create a monthly period
    pub fn month(year: i32, month: u32) -> Self {
        Self::Month { year, month }
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Get the current monthly period
    pub fn current_month() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    /// First day covered (inclusive)
    pub fn start_date(&self) -> NaiveDate {
        match self {
            Self::AllTime => NaiveDate::MIN,
            Self::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1)
                .unwrap_or_else(|| NaiveDate::from_ymd_opt(*year, 1, 1).unwrap_or(NaiveDate::MIN)),
        }
    }

    /// Last day covered (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        match self {
            Self::AllTime => NaiveDate::MAX,
            Self::Month { .. } => month_end(self.start_date()),
        }
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Parse `all` or a `YYYY-MM` month
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::AllTime);
        }

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }

        Ok(Self::Month { year, month })
    }
}

impl fmt::Display for SpendingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllTime => write!(f, "all time"),
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

/// Normalize a date to the first day of its month
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    next_month
        .map(|next| next - Duration::days(1))
        .unwrap_or(NaiveDate::MAX)
}

/// Errors from parsing a period string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid period format: {} (use YYYY-MM or all)", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
