//! Date windows used by the analytics reports

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};

/// An inclusive date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Rolling window presets ending today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "w" => Ok(Self::Week),
            "month" | "m" => Ok(Self::Month),
            "year" | "y" => Ok(Self::Year),
            other => Err(format!("Unknown period '{}'. Valid: week, month, year", other)),
        }
    }
}

impl DateRange {
    /// Build a range; `start` may equal `end` but not follow it
    pub fn new(start: NaiveDate, end: NaiveDate) -> ExpenseResult<Self> {
        if start > end {
            return Err(ExpenseError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The window of `period` that ends on `today`
    ///
    /// A week is the last 7 days; a month or year starts the day after the
    /// same calendar date one month or year earlier.
    pub fn last(period: Period, today: NaiveDate) -> Self {
        let start = match period {
            Period::Week => today.checked_sub_days(Days::new(6)),
            Period::Month => today
                .checked_sub_months(Months::new(1))
                .and_then(|d| d.checked_add_days(Days::new(1))),
            Period::Year => today
                .checked_sub_months(Months::new(12))
                .and_then(|d| d.checked_add_days(Days::new(1))),
        }
        .unwrap_or(today);

        Self { start, end: today }
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// A calendar month, displayed as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month before this one
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_rejects_reversed_range() {
        assert!(DateRange::new(date(2025, 1, 1), date(2025, 1, 1)).is_ok());
        assert!(matches!(
            DateRange::new(date(2025, 1, 2), date(2025, 1, 1)),
            Err(ExpenseError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert!(range.contains(date(2025, 1, 1)));
        assert!(range.contains(date(2025, 1, 31)));
        assert!(!range.contains(date(2025, 2, 1)));
    }

    #[test]
    fn test_presets() {
        let today = date(2025, 3, 15);

        let week = DateRange::last(Period::Week, today);
        assert_eq!(week.start(), date(2025, 3, 9));
        assert_eq!(week.end(), today);

        let month = DateRange::last(Period::Month, today);
        assert_eq!(month.start(), date(2025, 2, 16));

        let year = DateRange::last(Period::Year, today);
        assert_eq!(year.start(), date(2024, 3, 16));
    }

    #[test]
    fn test_month_of() {
        let feb = DateRange::month_of(date(2024, 2, 10));
        assert_eq!(feb.start(), date(2024, 2, 1));
        assert_eq!(feb.end(), date(2024, 2, 29));

        let dec = DateRange::month_of(date(2025, 12, 31));
        assert_eq!(dec.end(), date(2025, 12, 31));
    }

    #[test]
    fn test_month_key() {
        let key = MonthKey::of(date(2025, 1, 20));
        assert_eq!(key.to_string(), "2025-01");
        assert_eq!(key.previous().to_string(), "2024-12");
        assert!(MonthKey::of(date(2024, 12, 1)) < key);
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("Week".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("y".parse::<Period>().unwrap(), Period::Year);
        assert!("decade".parse::<Period>().is_err());
    }
}
