//! Calendar date, time-of-day and timestamp values as seen by applications.
//!
//! The types here are plain component records. They convert one-to-one from the
//! fixed-layout structures a database driver fills in, so a value read from a
//! driver and written back is reproduced exactly, including values a calendar
//! would reject. Use [`Date::is_valid`] and friends, or the `chrono` conversions,
//! when validation matters.

pub mod date;
pub mod datetime;
pub mod time;

#[cfg(test)]
mod tests;

pub use date::Date;
pub use datetime::DateTime;
pub use time::Time;

pub const NANOSECONDS_PER_SECOND: u32 = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    InvalidArgument(String),
    Parse(String),
}

impl std::fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DateTimeError::InvalidArgument(desc) => write!(f, "Invalid argument: {desc}"),
            DateTimeError::Parse(desc) => write!(f, "Failed to parse: {desc}"),
        }
    }
}

impl std::error::Error for DateTimeError {}

pub type DateTimeResult<T> = std::result::Result<T, DateTimeError>;
