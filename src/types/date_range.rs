//! The observation window of a water extent query.

use chrono::NaiveDate;
use std::fmt;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Format every date on the command line and in query results must follow.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Date should be in YYYY-MM-DD, got '{value}'")]
    InvalidFormat { value: String },

    #[error("Start Date should be earlier than the End Date ({start} > {end})")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// A validated pair of calendar dates with `start <= end`.
///
/// The remote date filter treats the range as half-open, `[start, end)`: images
/// acquired on `end` itself are not part of the series. A range where `start == end`
/// is accepted but matches no images.
///
/// # Examples
///
/// ```
/// use water_extent::DateRange;
///
/// let range = DateRange::parse("2015-01-01", "2016-12-31").unwrap();
/// assert_eq!(range.to_string(), "2015-01-01..2016-12-31");
///
/// assert!(DateRange::parse("2016-12-31", "2015-01-01").is_err());
/// assert!(DateRange::parse("01/01/2015", "2016-12-31").is_err());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses both dates as `YYYY-MM-DD` and checks their ordering.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_string(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_string(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_string(), self.end_string())
    }
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, DateRangeError> {
    let invalid = || DateRangeError::InvalidFormat {
        value: value.to_string(),
    };
    // chrono's %Y takes a sign and padding; a date here starts with the year's first digit
    if !value.as_bytes().first().is_some_and(u8::is_ascii_digit) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}
