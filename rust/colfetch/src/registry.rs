//! The buffer registry: the statement-side owner of bound buffers and their
//! length bookkeeping.
//!
//! Statement preparation allocates buffers, decides column widths and row
//! counts, and records what the driver reported for every (column, row). The
//! extraction engine only reads that state through [`BufferRegistry`].

use colfetch_common::Result;

use crate::{buffer::BoundBuffer, data_type::DataType, indicator::Indicator};

/// How column data reaches the engine for one statement execution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExtractionMode {
    /// The driver has written all requested rows into the bound buffers before
    /// extraction starts.
    Bound,
    /// Each extraction pulls the value from the driver, possibly in several chunks.
    Manual,
}

/// Read access to the prepared statement's bound buffers and metadata.
///
/// Implementations report out-of-bounds columns and rows with a `Range` error.
pub trait BufferRegistry {
    /// Extraction mode, fixed for the statement execution.
    fn extraction_mode(&self) -> ExtractionMode;

    /// Number of result-set columns.
    fn column_count(&self) -> usize;

    /// Logical type of the column.
    fn column_type(&self, column: usize) -> Result<DataType>;

    /// Declared maximum width of the column in bytes; the stride of bound text data.
    fn column_width(&self, column: usize) -> Result<usize>;

    /// Length indicator recorded for `(column, row)`. Scalar statements use row 0.
    fn actual_data_size(&self, column: usize, row: usize) -> Result<Indicator>;

    /// Largest data size bound for the column; the stride of bound binary data.
    fn max_data_size(&self, column: usize) -> Result<usize>;

    /// Configured maximum size of a single field value, in bytes.
    fn max_field_size(&self) -> usize;

    /// Number of rows the fixed-width bound buffers hold.
    fn length(&self) -> usize;

    /// Number of rows in a bulk fetch.
    fn bulk_size(&self) -> usize;

    /// View of the bound buffer for the column.
    fn buffer(&self, column: usize) -> Result<BoundBuffer<'_>>;
}

impl<T: BufferRegistry + ?Sized> BufferRegistry for &T {
    fn extraction_mode(&self) -> ExtractionMode {
        (**self).extraction_mode()
    }

    fn column_count(&self) -> usize {
        (**self).column_count()
    }

    fn column_type(&self, column: usize) -> Result<DataType> {
        (**self).column_type(column)
    }

    fn column_width(&self, column: usize) -> Result<usize> {
        (**self).column_width(column)
    }

    fn actual_data_size(&self, column: usize, row: usize) -> Result<Indicator> {
        (**self).actual_data_size(column, row)
    }

    fn max_data_size(&self, column: usize) -> Result<usize> {
        (**self).max_data_size(column)
    }

    fn max_field_size(&self) -> usize {
        (**self).max_field_size()
    }

    fn length(&self) -> usize {
        (**self).length()
    }

    fn bulk_size(&self) -> usize {
        (**self).bulk_size()
    }

    fn buffer(&self, column: usize) -> Result<BoundBuffer<'_>> {
        (**self).buffer(column)
    }
}
