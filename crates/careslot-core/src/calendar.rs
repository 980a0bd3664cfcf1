//! Date formatting for confirmations and calendar headers.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::availability::weekday_index;

/// The calendar zoom level staff can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Day,
    Week,
    Month,
}

impl CalendarView {
    pub fn label(self) -> &'static str {
        match self {
            CalendarView::Day => "Day",
            CalendarView::Week => "Week",
            CalendarView::Month => "Month",
        }
    }

    /// Day → Week → Month → Day.
    pub fn next(self) -> Self {
        match self {
            CalendarView::Day => CalendarView::Week,
            CalendarView::Week => CalendarView::Month,
            CalendarView::Month => CalendarView::Day,
        }
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long form used in confirmations, e.g. "Wednesday, May 21st, 2025".
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {}{}, {}",
        date.format("%A"),
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(weekday_index(date)))
}

/// Header text for the range `view` shows around `date`.
pub fn date_range_text(date: NaiveDate, view: CalendarView) -> String {
    match view {
        CalendarView::Day => date.format("%B %-d, %Y").to_string(),
        CalendarView::Week => {
            let start = week_start(date);
            let end = start + Duration::days(6);
            format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
        }
        CalendarView::Month => date.format("%B %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn long_date_uses_ordinals() {
        assert_eq!(long_date(date(2025, 5, 21)), "Wednesday, May 21st, 2025");
        assert_eq!(long_date(date(2025, 5, 22)), "Thursday, May 22nd, 2025");
        assert_eq!(long_date(date(2025, 5, 23)), "Friday, May 23rd, 2025");
        assert_eq!(long_date(date(2025, 5, 11)), "Sunday, May 11th, 2025");
        assert_eq!(long_date(date(2025, 5, 12)), "Monday, May 12th, 2025");
        assert_eq!(long_date(date(2025, 5, 13)), "Tuesday, May 13th, 2025");
        assert_eq!(long_date(date(2025, 6, 1)), "Sunday, June 1st, 2025");
    }

    #[test]
    fn day_range_text() {
        assert_eq!(date_range_text(date(2025, 5, 21), CalendarView::Day), "May 21, 2025");
    }

    #[test]
    fn week_range_starts_on_sunday() {
        assert_eq!(
            date_range_text(date(2025, 5, 21), CalendarView::Week),
            "May 18 - May 24, 2025"
        );
        // A Sunday is its own week start.
        assert_eq!(week_start(date(2025, 5, 18)), date(2025, 5, 18));
    }

    #[test]
    fn week_range_can_span_months() {
        assert_eq!(
            date_range_text(date(2025, 6, 2), CalendarView::Week),
            "Jun 1 - Jun 7, 2025"
        );
        assert_eq!(
            date_range_text(date(2025, 7, 1), CalendarView::Week),
            "Jun 29 - Jul 5, 2025"
        );
    }

    #[test]
    fn month_range_text() {
        assert_eq!(date_range_text(date(2025, 5, 21), CalendarView::Month), "May 2025");
    }

    #[test]
    fn view_cycles() {
        assert_eq!(CalendarView::Day.next(), CalendarView::Week);
        assert_eq!(CalendarView::Month.next(), CalendarView::Day);
    }
}
