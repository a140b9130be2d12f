use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::{DateTimeError, DateTimeResult};

/// A time of day with whole-second precision.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Time {
    hour: u32,
    minute: u32,
    second: u32,
}

impl Time {
    pub const MIDNIGHT: Time = Time::new(0, 0, 0);

    pub const fn new(hour: u32, minute: u32, second: u32) -> Time {
        Time {
            hour,
            minute,
            second,
        }
    }

    pub fn try_new(hour: u32, minute: u32, second: u32) -> DateTimeResult<Time> {
        let time = Time::new(hour, minute, second);
        if time.is_valid() {
            Ok(time)
        } else {
            Err(DateTimeError::InvalidArgument(format!(
                "{hour:02}:{minute:02}:{second:02} is not a time of day"
            )))
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn is_valid(&self) -> bool {
        self.to_naive().is_some()
    }

    pub fn to_naive(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, self.second)
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_from_midnight(&self) -> u32 {
        self.hour * 3600 + self.minute * 60 + self.second
    }
}

impl From<NaiveTime> for Time {
    fn from(time: NaiveTime) -> Self {
        Time::new(time.hour(), time.minute(), time.second())
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl FromStr for Time {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M:%S")
            .map(Time::from)
            .map_err(|e| DateTimeError::Parse(format!("'{s}' as time: {e}")))
    }
}
