//! The extraction engine.

use colfetch_common::{Result, error::Error, verify_index};

use crate::{
    buffer::{BoundBuffer, RawCell},
    chunked::{self, FetchContext},
    codec::ColumnCodec,
    data_type::{Layout, dispatch_data_type},
    extract::{Extract, RowContainer},
    indicator::Indicator,
    null_mask::NullMask,
    options::ExtractorOptions,
    registry::{BufferRegistry, ExtractionMode},
    transport::DataTransport,
    value::Value,
    vectorized,
};

/// Outcome of a successful extraction: a value, or SQL NULL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extracted<T> {
    Value(T),
    Null,
}

impl<T> Extracted<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, Extracted::Null)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Extracted::Value(v) => Some(v),
            Extracted::Null => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Extracted::Value(v) => Some(v),
            Extracted::Null => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extracted<U> {
        match self {
            Extracted::Value(v) => Extracted::Value(f(v)),
            Extracted::Null => Extracted::Null,
        }
    }
}

impl<T> From<Extracted<T>> for Option<T> {
    fn from(extracted: Extracted<T>) -> Self {
        extracted.into_option()
    }
}

/// Rows of one bulk-extracted column and their NULL flags, index-aligned.
#[derive(Clone, Debug, PartialEq)]
pub struct BulkColumn<C> {
    pub values: C,
    pub nulls: NullMask,
}

/// Fails with `SizeExceeded` if `size` is over `max`.
#[inline]
pub fn check_data_size(size: usize, max: usize) -> Result<()> {
    if size > max {
        return Err(Error::size_exceeded(size, max));
    }
    Ok(())
}

/// Converts the columns of the current result row (or bulk rowset) into typed values.
///
/// The extractor borrows the statement's buffer registry and driver transport
/// for its lifetime. The extraction mode is read from the registry once, at
/// construction.
pub struct Extractor<'s, R: ?Sized, D: ?Sized> {
    registry: &'s R,
    transport: &'s mut D,
    options: ExtractorOptions,
    mode: ExtractionMode,
    /// Final indicator of the last manual extraction of each column.
    indicators: Vec<Option<Indicator>>,
}

impl<'s, R, D> Extractor<'s, R, D>
where
    R: BufferRegistry + ?Sized,
    D: DataTransport + ?Sized,
{
    pub fn new(registry: &'s R, transport: &'s mut D) -> Extractor<'s, R, D> {
        Extractor {
            registry,
            transport,
            options: ExtractorOptions::default(),
            mode: registry.extraction_mode(),
            indicators: Vec::new(),
        }
    }

    pub fn with_options(
        registry: &'s R,
        transport: &'s mut D,
        options: ExtractorOptions,
    ) -> Result<Extractor<'s, R, D>> {
        options.validate()?;
        let mut extractor = Extractor::new(registry, transport);
        extractor.options = options;
        Ok(extractor)
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    pub fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    pub fn registry(&self) -> &'s R {
        self.registry
    }

    /// Extracts `column` into `target`.
    ///
    /// Returns `false` and leaves `target` untouched if the value is NULL.
    /// Containers always return `true`; their NULL rows are reported by
    /// [`is_null_at`](Self::is_null_at) or [`extract_bulk`](Self::extract_bulk).
    pub fn extract<T: Extract>(&mut self, column: usize, target: &mut T) -> Result<bool> {
        match T::extract_from(self, column)? {
            Extracted::Value(value) => {
                *target = value;
                Ok(true)
            }
            Extracted::Null => Ok(false),
        }
    }

    pub fn fetch<T: Extract>(&mut self, column: usize) -> Result<Extracted<T>> {
        T::extract_from(self, column)
    }

    /// Extracts a single value of a codec type, choosing the manual or bound path.
    pub fn fetch_value<T: ColumnCodec>(&mut self, column: usize) -> Result<Extracted<T>> {
        match self.mode {
            ExtractionMode::Manual => self.fetch_manual(column),
            ExtractionMode::Bound => self.fetch_bound(column),
        }
    }

    /// Extracts a single value as the type the registry reports for the column.
    pub fn fetch_dynamic(&mut self, column: usize) -> Result<Extracted<Value>> {
        let data_type = self.registry.column_type(column)?;
        log::debug!("column {column}: dynamic extraction as {data_type}");
        dispatch_data_type!(data_type, T => {
            Ok(self.fetch_value::<T>(column)?.map(Value::from))
        })
    }

    /// Extracts every bound row of `column` together with its NULL mask.
    ///
    /// Fails with `InvalidAccess` in manual mode.
    pub fn extract_bulk<C: RowContainer>(&mut self, column: usize) -> Result<BulkColumn<C>> {
        if self.mode == ExtractionMode::Manual {
            return Err(Error::invalid_access(
                "direct container extraction is only allowed in bound mode",
            ));
        }
        let values = C::extract_rows(self.registry, column)?;
        let nulls = vectorized::null_mask(self.registry, column, values.row_count())?;
        log::debug!(
            "column {column}: extracted {} rows, {} null",
            nulls.len(),
            nulls.count_nulls()
        );
        Ok(BulkColumn { values, nulls })
    }

    /// Returns whether the current value of `column` is NULL.
    ///
    /// In manual mode this reports the outcome of the last extraction of the
    /// column and fails with a `Range` error if there is none.
    pub fn is_null(&self, column: usize) -> Result<bool> {
        match self.mode {
            ExtractionMode::Bound => Ok(self.registry.actual_data_size(column, 0)?.is_null()),
            ExtractionMode::Manual => match self.indicators.get(column).copied().flatten() {
                Some(indicator) => Ok(indicator.is_null()),
                None => Err(Error::out_of_range("column", column, self.indicators.len())),
            },
        }
    }

    /// Returns whether `row` of `column` is NULL. Manual mode tracks row 0 only.
    pub fn is_null_at(&self, column: usize, row: usize) -> Result<bool> {
        match self.mode {
            ExtractionMode::Bound => Ok(self.registry.actual_data_size(column, row)?.is_null()),
            ExtractionMode::Manual => {
                verify_index!("row", row, 1);
                self.is_null(column)
            }
        }
    }

    fn fetch_manual<T: ColumnCodec>(&mut self, column: usize) -> Result<Extracted<T>> {
        verify_index!("column", column, self.registry.column_count());
        if self.indicators.len() <= column {
            self.indicators.resize(column + 1, None);
        }
        self.indicators[column] = None;

        let mut ctx = FetchContext::new(column, T::C_TYPE);
        let fetched = match T::DATA_TYPE.layout().fixed_width() {
            Some(width) => chunked::fetch_fixed(&mut ctx, self.transport, width),
            None => chunked::stream_value(
                &mut ctx,
                self.transport,
                self.options.chunk_size,
                self.registry.max_field_size(),
            ),
        };
        self.indicators[column] = ctx.indicator();

        match fetched? {
            Some(bytes) => Ok(Extracted::Value(T::decode_owned(bytes)?)),
            None => Ok(Extracted::Null),
        }
    }

    fn fetch_bound<T: ColumnCodec>(&mut self, column: usize) -> Result<Extracted<T>> {
        vectorized::verify_column_type::<T, R>(self.registry, column)?;
        let size = match self.registry.actual_data_size(column, 0)? {
            Indicator::Null => return Ok(Extracted::Null),
            Indicator::NoTotal => return Err(Error::unknown_length(column)),
            Indicator::Length(size) => size,
        };
        let max = self.registry.max_field_size();
        let buffer = self.registry.buffer(column)?;
        let layout = T::DATA_TYPE.layout();

        let value = match (layout, buffer) {
            (Layout::Fixed(width), BoundBuffer::Fixed { width: bound, data }) if bound == width => {
                T::decode(RawCell::Bytes(vectorized::slot(data, 0, width)?))?
            }
            (Layout::Text, BoundBuffer::Variable(data)) => {
                let width = self.registry.column_width(column)?;
                let slot = &data[..width.min(data.len())];
                let terminated = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
                let len = size.min(terminated);
                check_data_size(len, max)?;
                T::decode(RawCell::Bytes(&slot[..len]))?
            }
            (Layout::Binary, BoundBuffer::Variable(data)) => {
                check_data_size(size, max)?;
                T::decode(RawCell::Bytes(&data[..size.min(data.len())]))?
            }
            (Layout::Date, BoundBuffer::Date(cells)) => {
                check_data_size(size, max)?;
                T::decode(RawCell::Date(first_cell(cells)?))?
            }
            (Layout::Time, BoundBuffer::Time(cells)) => {
                check_data_size(size, max)?;
                T::decode(RawCell::Time(first_cell(cells)?))?
            }
            (Layout::Timestamp, BoundBuffer::Timestamp(cells)) => {
                check_data_size(size, max)?;
                T::decode(RawCell::Timestamp(first_cell(cells)?))?
            }
            (layout, buffer) => {
                return Err(Error::type_mismatch(
                    column,
                    layout.name(),
                    buffer.kind_name(),
                ));
            }
        };
        Ok(Extracted::Value(value))
    }
}

fn first_cell<C: Copy>(cells: &[C]) -> Result<C> {
    cells
        .first()
        .copied()
        .ok_or_else(|| Error::out_of_range("row", 0, 0))
}
