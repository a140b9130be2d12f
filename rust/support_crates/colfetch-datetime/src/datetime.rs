use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::{Date, DateTimeError, DateTimeResult, NANOSECONDS_PER_SECOND, Time};

/// A calendar date combined with a time of day and a nanosecond fraction.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DateTime {
    date: Date,
    time: Time,
    nanosecond: u32,
}

impl DateTime {
    pub const fn new(date: Date, time: Time, nanosecond: u32) -> DateTime {
        DateTime {
            date,
            time,
            nanosecond,
        }
    }

    /// Creates a timestamp from its components.
    ///
    /// # Examples
    /// ```rust
    /// # use colfetch_datetime::DateTime;
    /// let dt = DateTime::from_ymd_hms_nano(2023, 5, 15, 14, 30, 45, 500);
    /// assert_eq!(dt.date().month(), 5);
    /// assert_eq!(dt.time().minute(), 30);
    /// assert_eq!(dt.nanosecond(), 500);
    /// ```
    pub const fn from_ymd_hms_nano(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
    ) -> DateTime {
        DateTime::new(
            Date::new(year, month, day),
            Time::new(hour, minute, second),
            nanosecond,
        )
    }

    pub fn try_new(date: Date, time: Time, nanosecond: u32) -> DateTimeResult<DateTime> {
        let dt = DateTime::new(date, time, nanosecond);
        if dt.is_valid() {
            Ok(dt)
        } else {
            Err(DateTimeError::InvalidArgument(format!(
                "{dt} is not a valid timestamp"
            )))
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    pub fn is_valid(&self) -> bool {
        self.nanosecond < NANOSECONDS_PER_SECOND && self.to_naive().is_some()
    }

    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let date = self.date.to_naive()?;
        let time = self.time.to_naive()?.with_nanosecond(self.nanosecond)?;
        Some(NaiveDateTime::new(date, time))
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(dt: NaiveDateTime) -> Self {
        DateTime::new(
            Date::from(dt.date()),
            Time::from(dt.time()),
            dt.nanosecond(),
        )
    }
}

impl From<Date> for DateTime {
    fn from(date: Date) -> Self {
        DateTime::new(date, Time::MIDNIGHT, 0)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)?;
        if self.nanosecond != 0 {
            write!(f, ".{:09}", self.nanosecond)?;
        }
        Ok(())
    }
}

impl FromStr for DateTime {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
            .map(DateTime::from)
            .map_err(|e| DateTimeError::Parse(format!("'{s}' as timestamp: {e}")))
    }
}
