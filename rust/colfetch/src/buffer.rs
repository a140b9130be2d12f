//! Borrowed views over bound buffers and the single-value cells cut out of them.

use crate::native::{SqlDate, SqlTime, SqlTimestamp};

/// A read-only view of the storage bound for one column.
///
/// The registry owns the memory; a view is borrowed for the duration of a single
/// extraction call and never retained, since re-executing the statement may
/// reallocate the buffers.
#[derive(Copy, Clone, Debug)]
pub enum BoundBuffer<'a> {
    /// Fixed-width cells (numerics, boolean, single character) packed back to back.
    Fixed { width: usize, data: &'a [u8] },

    /// Variable-length data in fixed-stride slots. The stride is not part of the
    /// view: it is the column width for text and the maximum data size for binary
    /// columns, both owned by the registry.
    Variable(&'a [u8]),

    Date(&'a [SqlDate]),

    Time(&'a [SqlTime]),

    Timestamp(&'a [SqlTimestamp]),
}

impl<'a> BoundBuffer<'a> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            BoundBuffer::Fixed { .. } => "fixed-width",
            BoundBuffer::Variable(_) => "variable-length",
            BoundBuffer::Date(_) => "date",
            BoundBuffer::Time(_) => "time",
            BoundBuffer::Timestamp(_) => "timestamp",
        }
    }

    /// Number of bytes covered by the view.
    pub fn byte_len(&self) -> usize {
        match self {
            BoundBuffer::Fixed { data, .. } => data.len(),
            BoundBuffer::Variable(data) => data.len(),
            BoundBuffer::Date(s) => std::mem::size_of_val(*s),
            BoundBuffer::Time(s) => std::mem::size_of_val(*s),
            BoundBuffer::Timestamp(s) => std::mem::size_of_val(*s),
        }
    }
}

/// The driver-native representation of one value, ready for a codec to decode.
#[derive(Copy, Clone, Debug)]
pub enum RawCell<'a> {
    /// Raw bytes: a fixed-width cell, a variable-length slot trimmed to its
    /// actual length, or a whole value assembled from streamed chunks.
    Bytes(&'a [u8]),
    Date(SqlDate),
    Time(SqlTime),
    Timestamp(SqlTimestamp),
}

impl<'a> RawCell<'a> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            RawCell::Bytes(_) => "bytes",
            RawCell::Date(_) => "date",
            RawCell::Time(_) => "time",
            RawCell::Timestamp(_) => "timestamp",
        }
    }
}
