//! Calendar dates for the daily reward

use std::fmt;
use std::str::FromStr;

/// A calendar date (no time zone, no time of day)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

/// Why a `YYYY-MM-DD` string was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Not three dash-separated numeric fields
    Format,
    /// Month or day outside the calendar
    OutOfRange,
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateParseError::Format => write!(f, "expected a YYYY-MM-DD date"),
            DateParseError::OutOfRange => write!(f, "month or day out of range"),
        }
    }
}

impl std::error::Error for DateParseError {}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

impl CalendarDate {
    /// Build a date, rejecting impossible month/day combinations
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DateParseError> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(DateParseError::OutOfRange);
        }
        Ok(Self { year, month, day })
    }

    /// Civil date for a count of days since 1970-01-01
    pub fn from_days_since_epoch(days: i64) -> Self {
        // Days-to-civil over 400-year eras (proleptic Gregorian)
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        let year = (yoe + era * 400 + i64::from(month <= 2)) as i32;
        Self { year, month, day }
    }

    /// Civil date of a Unix timestamp seen from a zone `utc_offset` seconds east of UTC
    pub fn from_unix_seconds(secs: i64, utc_offset: i64) -> Self {
        Self::from_days_since_epoch((secs + utc_offset).div_euclid(86_400))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '-');
        let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DateParseError::Format);
        };
        if y.len() != 4 || m.len() != 2 || d.len() != 2 {
            return Err(DateParseError::Format);
        }
        let year = y.parse().map_err(|_| DateParseError::Format)?;
        let month = m.parse().map_err(|_| DateParseError::Format)?;
        let day = d.parse().map_err(|_| DateParseError::Format)?;
        Self::new(year, month, day)
    }
}

/// Today's local calendar date from the browser clock
#[cfg(target_arch = "wasm32")]
pub fn today() -> CalendarDate {
    let now = js_sys::Date::new_0();
    CalendarDate {
        year: now.get_full_year() as i32,
        month: (now.get_month() + 1) as u8,
        day: now.get_date() as u8,
    }
}

/// Today's local calendar date from the system clock and time zone
#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> CalendarDate {
    let now = chrono::Local::now();
    let offset = i64::from(now.offset().local_minus_utc());
    CalendarDate::from_unix_seconds(now.timestamp(), offset)
}
