//! Reporting period model.
//!
//! This module contains the [`ReportingPeriod`] type used to scope which
//! discount installments belong to a reporting window.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive date range selecting the figures that belong to a report.
///
/// # Example
///
/// ```
/// use commission_engine::models::ReportingPeriod;
/// use chrono::NaiveDate;
///
/// let period = ReportingPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
/// );
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl ReportingPeriod {
    /// Creates a period from its inclusive bounds.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Builds the calendar month containing `date`.
    ///
    /// Callers use this to default a report to "this month"; the current date
    /// is always passed in rather than read from the clock.
    ///
    /// # Example
    ///
    /// ```
    /// use commission_engine::models::ReportingPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = ReportingPeriod::month_of(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
    /// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    /// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    /// ```
    pub fn month_of(date: NaiveDate) -> Self {
        let start_date = first_day_of_month(date);
        Self {
            start_date,
            end_date: last_day_of_month(start_date),
        }
    }

    /// Checks if a given date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks whether the inclusive interval `[start, end]` shares at least one
    /// day with this period.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end_date && end >= self.start_date
    }

    /// Returns true when the period's start is after its end.
    pub fn is_inverted(&self) -> bool {
        self.start_date > self.end_date
    }
}

/// Returns the first calendar day of the month containing `date`.
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns the last calendar day of the month containing `date`.
///
/// Computed as the day before the first day of the following month, which
/// handles leap years and 30/31-day months alike.
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn february_2024() -> ReportingPeriod {
        ReportingPeriod::new(date(2024, 2, 1), date(2024, 2, 29))
    }

    #[test]
    fn test_contains_date_on_bounds() {
        let period = february_2024();
        assert!(period.contains_date(period.start_date));
        assert!(period.contains_date(period.end_date));
    }

    #[test]
    fn test_contains_date_outside_period() {
        let period = february_2024();
        assert!(!period.contains_date(date(2024, 1, 31)));
        assert!(!period.contains_date(date(2024, 3, 1)));
    }

    #[test]
    fn test_overlaps_partial_interval() {
        let period = ReportingPeriod::new(date(2024, 1, 20), date(2024, 2, 10));
        assert!(period.overlaps(date(2024, 2, 1), date(2024, 2, 29)));
        assert!(period.overlaps(date(2024, 1, 1), date(2024, 1, 31)));
        assert!(!period.overlaps(date(2024, 3, 1), date(2024, 3, 31)));
    }

    #[test]
    fn test_overlaps_touching_single_day() {
        let period = ReportingPeriod::new(date(2024, 1, 31), date(2024, 1, 31));
        assert!(period.overlaps(date(2024, 1, 1), date(2024, 1, 31)));
        assert!(!period.overlaps(date(2024, 2, 1), date(2024, 2, 29)));
    }

    #[test]
    fn test_month_of_handles_leap_and_december() {
        assert_eq!(ReportingPeriod::month_of(date(2024, 2, 29)), february_2024());

        let december = ReportingPeriod::month_of(date(2023, 12, 5));
        assert_eq!(december.start_date, date(2023, 12, 1));
        assert_eq!(december.end_date, date(2023, 12, 31));
    }

    #[test]
    fn test_last_day_of_month_for_thirty_day_month() {
        assert_eq!(last_day_of_month(date(2024, 4, 17)), date(2024, 4, 30));
        assert_eq!(last_day_of_month(date(2023, 2, 1)), date(2023, 2, 28));
    }

    #[test]
    fn test_is_inverted() {
        assert!(!february_2024().is_inverted());
        assert!(ReportingPeriod::new(date(2024, 3, 1), date(2024, 2, 1)).is_inverted());
    }

    #[test]
    fn test_deserialize_period() {
        let json = r#"{ "start_date": "2024-02-01", "end_date": "2024-02-29" }"#;
        let period: ReportingPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period, february_2024());
    }
}
