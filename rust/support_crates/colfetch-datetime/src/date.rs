use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{DateTimeError, DateTimeResult};

/// A calendar date made of year, month and day components.
///
/// Construction through [`Date::new`] does not validate the components; a date
/// decoded from a driver structure keeps whatever the driver wrote.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Date {
    year: i32,
    month: u32,
    day: u32,
}

impl Date {
    pub const fn new(year: i32, month: u32, day: u32) -> Date {
        Date { year, month, day }
    }

    /// Creates a date, rejecting components that do not name a real calendar day.
    ///
    /// # Examples
    /// ```rust
    /// # use colfetch_datetime::Date;
    /// assert!(Date::try_new(2024, 2, 29).is_ok());
    /// assert!(Date::try_new(2023, 2, 29).is_err());
    /// ```
    pub fn try_new(year: i32, month: u32, day: u32) -> DateTimeResult<Date> {
        let date = Date::new(year, month, day);
        if date.is_valid() {
            Ok(date)
        } else {
            Err(DateTimeError::InvalidArgument(format!(
                "{year:04}-{month:02}-{day:02} is not a calendar date"
            )))
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_valid(&self) -> bool {
        self.to_naive().is_some()
    }

    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for Date {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date::from)
            .map_err(|e| DateTimeError::Parse(format!("'{s}' as date: {e}")))
    }
}
