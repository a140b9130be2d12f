//! The driver transport: the single wire-level primitive the engine depends on.

use colfetch_common::{Result, error::Error};

use crate::{c_type::CDataType, indicator::Indicator};

/// Outcome of one successful chunk fetch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// Bytes written into the caller's buffer.
    pub written: usize,
    /// Length indicator for the call: `Null`, `NoTotal`, or the number of bytes
    /// that were still available before this call.
    pub indicator: Indicator,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FetchStatus {
    Data(Chunk),
    /// The column has no (more) data for the current row.
    NoData,
}

impl FetchStatus {
    /// A chunk for which the driver wrote `min(remaining, capacity)` bytes.
    pub fn data(remaining: usize, capacity: usize) -> FetchStatus {
        FetchStatus::Data(Chunk {
            written: remaining.min(capacity),
            indicator: Indicator::Length(remaining),
        })
    }

    pub fn null() -> FetchStatus {
        FetchStatus::Data(Chunk {
            written: 0,
            indicator: Indicator::Null,
        })
    }
}

/// Fetches the next chunk of a column value from the driver.
///
/// Each call copies up to `target.len()` bytes of the current row's value for
/// `column`, converted to `c_type`, and continues where the previous call for
/// the same column stopped. Variable-length values are written without a
/// terminator. Transport-level errors are reported as `Driver` errors.
pub trait DataTransport {
    fn get_data(
        &mut self,
        column: usize,
        c_type: CDataType,
        target: &mut [u8],
    ) -> Result<FetchStatus>;
}

impl<T: DataTransport + ?Sized> DataTransport for &mut T {
    fn get_data(
        &mut self,
        column: usize,
        c_type: CDataType,
        target: &mut [u8],
    ) -> Result<FetchStatus> {
        (**self).get_data(column, c_type, target)
    }
}

impl<T: DataTransport + ?Sized> DataTransport for Box<T> {
    fn get_data(
        &mut self,
        column: usize,
        c_type: CDataType,
        target: &mut [u8],
    ) -> Result<FetchStatus> {
        (**self).get_data(column, c_type, target)
    }
}

/// Transport for statements whose data is entirely bound: any fetch is a driver failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl DataTransport for Detached {
    fn get_data(
        &mut self,
        column: usize,
        c_type: CDataType,
        _target: &mut [u8],
    ) -> Result<FetchStatus> {
        Err(Error::driver(
            format!("get_data(column {column}, {c_type})"),
            "no driver transport attached to this statement",
        ))
    }
}
