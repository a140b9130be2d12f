//! In-memory buffer registry.

use colfetch::{
    buffer::BoundBuffer,
    codec::{ColumnCodec, encode_to_vec},
    data_type::{DataType, Layout},
    indicator::Indicator,
    native::{SqlDate, SqlTime, SqlTimestamp},
    registry::{BufferRegistry, ExtractionMode},
};
use colfetch_common::{Result, error::Error, verify_index};

/// Default maximum field size, 1 MiB.
pub const DEFAULT_MAX_FIELD_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone)]
enum Storage {
    Fixed { width: usize, data: Vec<u8> },
    Variable(Vec<u8>),
    Date(Vec<SqlDate>),
    Time(Vec<SqlTime>),
    Timestamp(Vec<SqlTimestamp>),
}

/// One bound column: its buffer and per-row length indicators.
#[derive(Debug, Clone)]
pub struct MemoryColumn {
    data_type: DataType,
    width: usize,
    max_data_size: usize,
    indicators: Vec<Indicator>,
    storage: Storage,
}

impl MemoryColumn {
    /// Lays out `rows` the way a driver binds values of `T`.
    ///
    /// Text and binary slots are as wide as the longest value (at least one
    /// byte); NULL rows are zero-filled.
    pub fn from_values<T: ColumnCodec>(rows: &[Option<T>]) -> MemoryColumn {
        let encoded: Vec<Option<Vec<u8>>> = rows
            .iter()
            .map(|row| row.as_ref().map(encode_to_vec))
            .collect();
        let indicators = encoded
            .iter()
            .map(|row| match row {
                Some(bytes) => Indicator::Length(bytes.len()),
                None => Indicator::Null,
            })
            .collect();

        let layout = T::DATA_TYPE.layout();
        let stride = match layout {
            Layout::Text | Layout::Binary => encoded
                .iter()
                .flatten()
                .map(Vec::len)
                .max()
                .unwrap_or(0)
                .max(1),
            other => other.fixed_width().unwrap_or(0),
        };
        let flat = pack(&encoded, stride, 0);

        let storage = match layout {
            Layout::Fixed(width) => Storage::Fixed { width, data: flat },
            Layout::Text | Layout::Binary => Storage::Variable(flat),
            Layout::Date => Storage::Date(cast_cells(&flat, stride)),
            Layout::Time => Storage::Time(cast_cells(&flat, stride)),
            Layout::Timestamp => Storage::Timestamp(cast_cells(&flat, stride)),
        };

        MemoryColumn {
            data_type: T::DATA_TYPE,
            width: stride,
            max_data_size: stride,
            indicators,
            storage,
        }
    }

    /// A text column with an explicit slot width. NULL slots are filled with
    /// `#` so that tests notice if their content leaks into a value.
    pub fn text(width: usize, rows: &[Option<&str>]) -> MemoryColumn {
        let encoded: Vec<Option<Vec<u8>>> = rows
            .iter()
            .map(|row| row.map(|s| s.as_bytes().to_vec()))
            .collect();
        let indicators = encoded
            .iter()
            .map(|row| match row {
                Some(bytes) => Indicator::Length(bytes.len()),
                None => Indicator::Null,
            })
            .collect();
        MemoryColumn {
            data_type: DataType::String,
            width,
            max_data_size: width,
            indicators,
            storage: Storage::Variable(pack(&encoded, width, b'#')),
        }
    }

    /// Overrides the indicator recorded for `row`.
    pub fn with_indicator(mut self, row: usize, indicator: Indicator) -> MemoryColumn {
        if row >= self.indicators.len() {
            self.indicators.resize(row + 1, Indicator::Null);
        }
        self.indicators[row] = indicator;
        self
    }

    /// Overrides the type the registry reports for the column.
    pub fn with_data_type(mut self, data_type: DataType) -> MemoryColumn {
        self.data_type = data_type;
        self
    }

    pub fn rows(&self) -> usize {
        self.indicators.len()
    }
}

fn pack(rows: &[Option<Vec<u8>>], stride: usize, null_fill: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(rows.len() * stride);
    for row in rows {
        let start = data.len();
        match row {
            Some(bytes) => data.extend_from_slice(&bytes[..bytes.len().min(stride)]),
            None => data.resize(start + stride, null_fill),
        }
        data.resize(start + stride, 0);
    }
    data
}

fn cast_cells<C: bytemuck::Pod>(data: &[u8], width: usize) -> Vec<C> {
    data.chunks_exact(width)
        .map(bytemuck::pod_read_unaligned)
        .collect()
}

/// A buffer registry backed by owned vectors.
#[derive(Debug, Clone)]
pub struct MemoryRegistry {
    mode: ExtractionMode,
    columns: Vec<MemoryColumn>,
    max_field_size: usize,
    column_count: Option<usize>,
    length: Option<usize>,
    bulk_size: Option<usize>,
}

impl MemoryRegistry {
    pub fn new(mode: ExtractionMode) -> MemoryRegistry {
        MemoryRegistry {
            mode,
            columns: Vec::new(),
            max_field_size: DEFAULT_MAX_FIELD_SIZE,
            column_count: None,
            length: None,
            bulk_size: None,
        }
    }

    pub fn bound() -> MemoryRegistry {
        Self::new(ExtractionMode::Bound)
    }

    pub fn manual() -> MemoryRegistry {
        Self::new(ExtractionMode::Manual)
    }

    pub fn column(mut self, column: MemoryColumn) -> MemoryRegistry {
        self.columns.push(column);
        self
    }

    pub fn max_field_size(mut self, max_field_size: usize) -> MemoryRegistry {
        self.max_field_size = max_field_size;
        self
    }

    /// Overrides the result-set column count; defaults to the number of added
    /// columns. Lets manual-mode tests address columns they never bind.
    pub fn column_count(mut self, column_count: usize) -> MemoryRegistry {
        self.column_count = Some(column_count);
        self
    }

    /// Overrides the fixed-width row count; defaults to the row count of the first column.
    pub fn length(mut self, length: usize) -> MemoryRegistry {
        self.length = Some(length);
        self
    }

    /// Overrides the bulk row count; defaults to the row count of the first column.
    pub fn bulk_size(mut self, bulk_size: usize) -> MemoryRegistry {
        self.bulk_size = Some(bulk_size);
        self
    }

    fn get(&self, column: usize) -> Result<&MemoryColumn> {
        verify_index!("column", column, self.columns.len());
        Ok(&self.columns[column])
    }

    fn default_rows(&self) -> usize {
        self.columns.first().map_or(0, MemoryColumn::rows)
    }
}

impl BufferRegistry for MemoryRegistry {
    fn extraction_mode(&self) -> ExtractionMode {
        self.mode
    }

    fn column_count(&self) -> usize {
        self.column_count.unwrap_or(self.columns.len())
    }

    fn column_type(&self, column: usize) -> Result<DataType> {
        Ok(self.get(column)?.data_type)
    }

    fn column_width(&self, column: usize) -> Result<usize> {
        Ok(self.get(column)?.width)
    }

    fn actual_data_size(&self, column: usize, row: usize) -> Result<Indicator> {
        let col = self.get(column)?;
        col.indicators
            .get(row)
            .copied()
            .ok_or_else(|| Error::out_of_range("row", row, col.indicators.len()))
    }

    fn max_data_size(&self, column: usize) -> Result<usize> {
        Ok(self.get(column)?.max_data_size)
    }

    fn max_field_size(&self) -> usize {
        self.max_field_size
    }

    fn length(&self) -> usize {
        self.length.unwrap_or_else(|| self.default_rows())
    }

    fn bulk_size(&self) -> usize {
        self.bulk_size.unwrap_or_else(|| self.default_rows())
    }

    fn buffer(&self, column: usize) -> Result<BoundBuffer<'_>> {
        Ok(match &self.get(column)?.storage {
            Storage::Fixed { width, data } => BoundBuffer::Fixed {
                width: *width,
                data,
            },
            Storage::Variable(data) => BoundBuffer::Variable(data),
            Storage::Date(cells) => BoundBuffer::Date(cells),
            Storage::Time(cells) => BoundBuffer::Time(cells),
            Storage::Timestamp(cells) => BoundBuffer::Timestamp(cells),
        })
    }
}
