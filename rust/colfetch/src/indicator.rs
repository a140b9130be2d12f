//! Driver length indicators.

use colfetch_common::{Result, error::Error};

/// Raw indicator value reporting SQL NULL.
pub const NULL_DATA: isize = -1;

/// Raw indicator value reporting that the total length of the remaining data is unknown.
pub const NO_TOTAL: isize = -4;

/// A driver-reported length indicator for one (column, row) cell.
///
/// For streamed values the `Length` variant carries the number of bytes still
/// available *before* the fetch that reported it, which may exceed the capacity
/// of the buffer the fetch wrote into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// The value is SQL NULL.
    Null,
    /// The driver cannot tell how many bytes remain.
    NoTotal,
    /// Byte length of the value (or of its remaining part).
    Length(usize),
}

impl Indicator {
    /// Converts a raw driver indicator.
    ///
    /// Negative values other than [`NULL_DATA`] and [`NO_TOTAL`] are reported as a
    /// driver failure.
    pub fn from_raw(raw: isize) -> Result<Indicator> {
        match raw {
            NULL_DATA => Ok(Indicator::Null),
            NO_TOTAL => Ok(Indicator::NoTotal),
            len if len >= 0 => Ok(Indicator::Length(len as usize)),
            other => Err(Error::driver(
                "length indicator",
                format!("unexpected length indicator value {other}"),
            )),
        }
    }

    pub fn to_raw(self) -> isize {
        match self {
            Indicator::Null => NULL_DATA,
            Indicator::NoTotal => NO_TOTAL,
            Indicator::Length(len) => len as isize,
        }
    }

    #[inline]
    pub fn is_null(self) -> bool {
        matches!(self, Indicator::Null)
    }

    #[inline]
    pub fn length(self) -> Option<usize> {
        match self {
            Indicator::Length(len) => Some(len),
            _ => None,
        }
    }
}
