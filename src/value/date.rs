//! # Date Conventions
//!
//! Dates travel through the crate as [`NaiveDateTime`]. Text is read and
//! written under a [`DateConvention`]: a field order plus a separator.
//! The default is year-month-day with `-` (`2024-03-17`).
//!
//! Two-digit years follow chrono's `%y` century window (`24` reads as 2024,
//! `85` as 1985).
//!
//! When a string does not match the convention, ISO-8601 date-times
//! (`2024-03-17T10:30:00`) and RFC 3339 timestamps are still accepted, so
//! values produced by other tools keep parsing.
//!
//! ```rust
//! use listkit::value::{DateConvention, DateFormat};
//!
//! let convention = DateConvention::new(DateFormat::DayMonthYear, '/');
//! let date = convention.parse("17/03/2024").unwrap();
//! assert_eq!(convention.format(&date), "17/03/2024");
//! assert_eq!(DateConvention::default().format(&date), "2024-03-17");
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Field order of a textual date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `MM-DD-YYYY`
    MonthDayYear,
    /// `YYYY-MM-DD`
    #[default]
    YearMonthDay,
    /// `MM-DD-YY`
    MonthDayShortYear,
    /// `YY-MM-DD`
    ShortYearMonthDay,
    /// `DD-MM-YY`
    DayMonthShortYear,
    /// `DD-MM-YYYY`
    DayMonthYear,
}

impl DateFormat {
    fn fields(&self) -> [&'static str; 3] {
        match self {
            DateFormat::MonthDayYear => ["%m", "%d", "%Y"],
            DateFormat::YearMonthDay => ["%Y", "%m", "%d"],
            DateFormat::MonthDayShortYear => ["%m", "%d", "%y"],
            DateFormat::ShortYearMonthDay => ["%y", "%m", "%d"],
            DateFormat::DayMonthShortYear => ["%d", "%m", "%y"],
            DateFormat::DayMonthYear => ["%d", "%m", "%Y"],
        }
    }
}

/// Field order and separator used to read and write dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateConvention {
    pub format: DateFormat,
    pub separator: char,
}

impl DateConvention {
    pub fn new(format: DateFormat, separator: char) -> Self {
        DateConvention { format, separator }
    }

    fn pattern(&self) -> String {
        let separator = if self.separator == '%' {
            "%%".to_string()
        } else {
            self.separator.to_string()
        };
        self.format.fields().join(separator.as_str())
    }

    /// Reads a date, falling back to ISO-8601 and RFC 3339 forms.
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        if let Ok(date) = NaiveDate::parse_from_str(text, &self.pattern()) {
            return date.and_hms_opt(0, 0, 0);
        }
        if let Ok(date_time) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(date_time);
        }
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|date_time| date_time.naive_utc())
    }

    /// Writes the date part under this convention.
    pub fn format(&self, date: &NaiveDateTime) -> String {
        date.format(&self.pattern()).to_string()
    }
}

impl Default for DateConvention {
    fn default() -> Self {
        DateConvention::new(DateFormat::default(), '-')
    }
}

/// Milliseconds since the Unix epoch, treating the date as UTC.
pub fn epoch_millis(date: &NaiveDateTime) -> i64 {
    date.and_utc().timestamp_millis()
}

/// Inverse of [`epoch_millis`]. `None` when out of chrono's range.
pub fn from_epoch_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|date_time| date_time.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_convention_is_iso_date() {
        let date = DateConvention::default().parse("2024-03-17").unwrap();
        assert_eq!(date.to_string(), "2024-03-17 00:00:00");
    }

    #[test]
    fn test_short_year_pivot() {
        let convention = DateConvention::new(DateFormat::DayMonthShortYear, '.');
        assert_eq!(
            convention.parse("01.02.24").unwrap().format("%Y").to_string(),
            "2024"
        );
        assert_eq!(
            convention.parse("01.02.85").unwrap().format("%Y").to_string(),
            "1985"
        );
    }

    #[test]
    fn test_month_first() {
        let convention = DateConvention::new(DateFormat::MonthDayYear, '/');
        let date = convention.parse("12/31/1999").unwrap();
        assert_eq!(DateConvention::default().format(&date), "1999-12-31");
    }

    #[test]
    fn test_iso_fallback() {
        let convention = DateConvention::new(DateFormat::DayMonthYear, '/');
        let date = convention.parse("2024-03-17T10:30:00").unwrap();
        assert_eq!(date.format("%H:%M").to_string(), "10:30");
    }

    #[test]
    fn test_unparseable() {
        assert!(DateConvention::default().parse("yesterday").is_none());
    }

    #[test]
    fn test_epoch_millis_round_trip() {
        let date = DateConvention::default().parse("1970-01-02").unwrap();
        assert_eq!(epoch_millis(&date), 86_400_000);
        assert_eq!(from_epoch_millis(86_400_000), Some(date));
    }
}
