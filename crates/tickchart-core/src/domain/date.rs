use std::fmt::{Display, Formatter};
use std::str::FromStr;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

use crate::ValidationError;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

/// Calendar date with no time component, only obtainable from a strict
/// `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(Date);

impl CalendarDate {
    /// Parse a strict `YYYY-MM-DD` date.
    ///
    /// Anything other than four digits, `-`, two digits, `-`, two digits that
    /// names a real day (leap years included) is rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate {
            value: input.to_owned(),
        };

        if !has_strict_date_shape(input) {
            return Err(invalid());
        }

        Date::parse(input, DATE_FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    pub const fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u8 {
        u8::from(self.0.month())
    }

    pub const fn day(self) -> u8 {
        self.0.day()
    }

    /// Year-month selector containing this date.
    pub fn year_month(self) -> YearMonth {
        YearMonth {
            year: self.year(),
            month: self.month(),
        }
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl From<Date> for CalendarDate {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

/// `YYYY-MM` month selector sent with intraday requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Point in time parsed from a provider timestamp key.
///
/// Daily, weekly and monthly keys carry only a date and sort at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesTimestamp {
    date: CalendarDate,
    at: PrimitiveDateTime,
}

impl SeriesTimestamp {
    pub fn parse(input: &str) -> Option<Self> {
        let (date_part, time_part) = match input.split_once(' ') {
            Some((date_part, time_part)) => (date_part, Some(time_part)),
            None => (input, None),
        };

        let date = CalendarDate::parse(date_part).ok()?;
        let time_of_day = match time_part {
            Some(raw) => Time::parse(raw, TIME_FORMAT).ok()?,
            None => Time::MIDNIGHT,
        };

        Some(Self {
            date,
            at: PrimitiveDateTime::new(date.into_inner(), time_of_day),
        })
    }

    pub const fn date(self) -> CalendarDate {
        self.date
    }
}

impl From<CalendarDate> for SeriesTimestamp {
    fn from(date: CalendarDate) -> Self {
        Self {
            date,
            at: PrimitiveDateTime::new(date.into_inner(), Time::MIDNIGHT),
        }
    }
}

fn has_strict_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}
