//! Driver-native fixed-layout temporal structures and their structural
//! conversions to the application temporal types.
//!
//! The conversions are pure field-by-field mappings: they never validate and
//! never fail, so a structure decoded and encoded again is reproduced exactly
//! (for years representable in an `i16`).

use bytemuck::{Pod, Zeroable};
use colfetch_datetime::{Date, DateTime, Time};

/// `SQL_DATE_STRUCT`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct SqlDate {
    pub year: i16,
    pub month: u16,
    pub day: u16,
}

/// `SQL_TIME_STRUCT`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct SqlTime {
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

/// `SQL_TIMESTAMP_STRUCT`, with `fraction` in nanoseconds.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct SqlTimestamp {
    pub year: i16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
    pub fraction: u32,
}

impl From<SqlDate> for Date {
    fn from(ds: SqlDate) -> Self {
        Date::new(ds.year as i32, ds.month as u32, ds.day as u32)
    }
}

impl From<Date> for SqlDate {
    fn from(date: Date) -> Self {
        SqlDate {
            year: date.year() as i16,
            month: date.month() as u16,
            day: date.day() as u16,
        }
    }
}

impl From<SqlTime> for Time {
    fn from(ts: SqlTime) -> Self {
        Time::new(ts.hour as u32, ts.minute as u32, ts.second as u32)
    }
}

impl From<Time> for SqlTime {
    fn from(time: Time) -> Self {
        SqlTime {
            hour: time.hour() as u16,
            minute: time.minute() as u16,
            second: time.second() as u16,
        }
    }
}

impl From<SqlTimestamp> for DateTime {
    fn from(tss: SqlTimestamp) -> Self {
        DateTime::from_ymd_hms_nano(
            tss.year as i32,
            tss.month as u32,
            tss.day as u32,
            tss.hour as u32,
            tss.minute as u32,
            tss.second as u32,
            tss.fraction,
        )
    }
}

impl From<DateTime> for SqlTimestamp {
    fn from(dt: DateTime) -> Self {
        let date = dt.date();
        let time = dt.time();
        SqlTimestamp {
            year: date.year() as i16,
            month: date.month() as u16,
            day: date.day() as u16,
            hour: time.hour() as u16,
            minute: time.minute() as u16,
            second: time.second() as u16,
            fraction: dt.nanosecond(),
        }
    }
}
